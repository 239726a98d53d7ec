use genmeta::{MetaOp, RegisterLayout};

#[test]
fn footprints_never_alias() {
    for op in MetaOp::ALL {
        let layout = RegisterLayout::plan(op, 2);
        let footprints = layout.footprints();
        for (i, (name_a, span_a)) in footprints.iter().enumerate() {
            for (name_b, span_b) in &footprints[i + 1..] {
                let disjoint = span_a.end <= span_b.start || span_b.end <= span_a.start;
                assert!(
                    disjoint,
                    "{op}: {name_a} ({span_a:?}) overlaps {name_b} ({span_b:?})"
                );
            }
        }
    }
}

#[test]
fn every_value_stays_inside_the_claimed_rows() {
    for op in MetaOp::ALL {
        let layout = RegisterLayout::plan(op, 2);
        let lo = layout.first_push_constant_grf as usize * 32;
        let hi = layout.next_free_grf as usize * 32;
        for (name, span) in layout.footprints() {
            assert!(
                span.start >= lo && span.end <= hi,
                "{op}: {name} ({span:?}) outside rows {lo}..{hi}"
            );
        }
    }
}

#[test]
fn working_registers_are_identical_across_operations() {
    let reference = RegisterLayout::plan(MetaOp::ClearColor, 2);
    for op in MetaOp::ALL {
        let layout = RegisterLayout::plan(op, 2);
        assert_eq!(layout.frag_x, reference.frag_x);
        assert_eq!(layout.frag_y, reference.frag_y);
        assert_eq!(layout.texels, reference.texels);
        assert_eq!(layout.tmp1, reference.tmp1);
        assert_eq!(layout.tmp2, reference.tmp2);
        assert_eq!(layout.base_mrf, reference.base_mrf);
        assert_eq!(layout.next_free_grf, reference.next_free_grf);
    }
}

#[test]
fn clears_bind_only_the_clear_values() {
    for op in [MetaOp::ClearColor, MetaOp::ClearDepth] {
        let operands = RegisterLayout::plan(op, 2).operands;
        assert!(operands.clear_vals.iter().all(|slot| slot.is_some()));
        assert!(operands.src_offset_x.is_none());
        assert!(operands.src_offset_y.is_none());
        assert!(operands.src_layer.is_none());
        assert!(operands.src_lod.is_none());
        assert!(operands.dst_mem_offset.is_none());
        assert!(operands.dst_extent_width.is_none());
    }
}

#[test]
fn copies_and_resolves_bind_the_source_offsets() {
    for op in MetaOp::ALL.iter().filter(|op| !op.is_clear()) {
        let operands = RegisterLayout::plan(*op, 2).operands;
        assert!(operands.clear_vals.iter().all(|slot| slot.is_none()));
        assert!(operands.src_offset_x.is_some(), "{op}");
        assert!(operands.src_offset_y.is_some(), "{op}");
    }
}

#[test]
fn sampling_copies_add_layer_and_lod() {
    for op in MetaOp::ALL.iter().filter(|op| op.is_sampling_copy()) {
        let operands = RegisterLayout::plan(*op, 2).operands;
        assert!(operands.src_layer.is_some(), "{op}");
        assert!(operands.src_lod.is_some(), "{op}");
        assert!(operands.dst_mem_offset.is_none(), "{op}");
        assert!(operands.dst_extent_width.is_none(), "{op}");
    }
}

#[test]
fn copies_to_memory_add_the_destination_window() {
    for op in MetaOp::ALL.iter().filter(|op| op.is_copy_to_mem()) {
        let operands = RegisterLayout::plan(*op, 2).operands;
        assert!(operands.src_layer.is_some(), "{op}");
        assert!(operands.src_lod.is_some(), "{op}");
        assert!(operands.dst_mem_offset.is_some(), "{op}");
        assert!(operands.dst_extent_width.is_some(), "{op}");
    }
}

#[test]
fn uploads_and_resolves_bind_the_rest_sparsely() {
    let upload = RegisterLayout::plan(MetaOp::CopyMemToImg, 2).operands;
    assert!(upload.dst_extent_width.is_some());
    assert!(upload.src_layer.is_none());
    assert!(upload.dst_mem_offset.is_none());

    for op in MetaOp::ALL.iter().filter(|op| op.is_resolve()) {
        assert_eq!(RegisterLayout::plan(*op, 2).operands.bound_count(), 2, "{op}");
    }
}
