//! Pack compiled programs into a relocatable object.
//!
//! Inspection tooling (readelf, objdump, custom disassemblers) speaks ELF,
//! so the dump binary stores the whole repertoire in one object: a `.text`
//! section holding the concatenated programs and one symbol per operation.
//! The container is host-side; the section data is GPU machine code.

use object::write::{Object, StandardSegment, Symbol, SymbolSection};
use object::{
    Architecture, BinaryFormat, Endianness, SectionKind, SymbolFlags, SymbolKind, SymbolScope,
};

use crate::meta::compiler::MetaShader;

/// Build an ELF object with one `.text` symbol per compiled program.
pub fn build_object(shaders: &[MetaShader]) -> Result<Vec<u8>, object::write::Error> {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let segment = obj.segment_name(StandardSegment::Text).to_vec();
    let text = obj.add_section(segment, b".text".to_vec(), SectionKind::Text);

    for shader in shaders {
        // align each program to the 16-byte instruction size
        let offset = obj.append_section_data(text, &shader.code, 16);
        obj.add_symbol(Symbol {
            name: shader.op.name().as_bytes().to_vec(),
            value: offset,
            size: shader.code.len() as u64,
            kind: SymbolKind::Text,
            scope: SymbolScope::Linkage,
            weak: false,
            section: SymbolSection::Section(text),
            flags: SymbolFlags::None,
        });
    }

    obj.write()
}
