use genmeta::{compile_meta_shader, GpuDescriptor, MetaOp, MetaShader, GEN6, GEN7, GEN75};

fn compile(gen: u32, op: MetaOp) -> MetaShader {
    compile_meta_shader(&GpuDescriptor::new(gen, 2), op).unwrap()
}

fn words(shader: &MetaShader, index: usize) -> [u32; 4] {
    let inst = &shader.code[index * 16..(index + 1) * 16];
    let mut out = [0u32; 4];
    for (word, bytes) in out.iter_mut().zip(inst.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    out
}

fn dst_file(dw1: u32) -> u32 {
    dw1 & 0x3
}

fn dst_nr(dw1: u32) -> u32 {
    (dw1 >> 21) & 0xff
}

#[test]
fn fragment_coordinates_use_the_quad_offset_vectors() {
    let shader = compile(GEN75, MetaOp::CopyMem);

    // x offsets alternate 0,1 within a quad; y offsets pair up
    let add_x = words(&shader, 0);
    let add_y = words(&shader, 1);
    assert_eq!(add_x[0] & 0x7f, 0x40);
    assert_eq!(add_x[3], 0x1010_1010);
    assert_eq!(add_y[3], 0x1100_1100);

    // both read the quad origins from row 1 as a <2;4,0> word region
    let origin_x = add_x[2];
    assert_eq!(origin_x & 0x1f, 8); // byte offset of the fourth word
    assert_eq!((origin_x >> 5) & 0xff, 1);
    assert_eq!((origin_x >> 16) & 0x3, 0); // hstride 0
    assert_eq!((origin_x >> 18) & 0x7, 2); // width 4
    assert_eq!((origin_x >> 21) & 0xf, 2); // vstride 2
    assert_eq!(add_y[2] & 0x1f, 10);
}

#[test]
fn simd16_is_native_on_gen7_and_compressed_on_gen6() {
    let gen7 = compile(GEN7, MetaOp::ClearColor);
    let gen6 = compile(GEN6, MetaOp::ClearColor);

    let mov7 = words(&gen7, 0);
    let mov6 = words(&gen6, 0);
    assert_eq!((mov7[0] >> 21) & 0x7, 4); // execution size 16
    assert_eq!((mov6[0] >> 21) & 0x7, 4);
    assert_eq!((mov7[0] >> 12) & 0x3, 0);
    assert_eq!((mov6[0] >> 12) & 0x3, 2); // compressed
}

#[test]
fn message_rows_stay_mrf_on_gen6_and_move_to_the_grf_window_on_gen7() {
    let gen6 = compile(GEN6, MetaOp::ClearColor);
    let gen7 = compile(GEN7, MetaOp::ClearColor);

    // first payload mov targets message row 2
    let mov6 = words(&gen6, 0);
    assert_eq!(dst_file(mov6[1]), 2);
    assert_eq!(dst_nr(mov6[1]), 2);

    let mov7 = words(&gen7, 0);
    assert_eq!(dst_file(mov7[1]), 1);
    assert_eq!(dst_nr(mov7[1]), 114);
}

#[test]
fn depth_clears_write_the_depth_payload_slot() {
    let gen7 = compile(GEN7, MetaOp::ClearDepth);
    let mov = words(&gen7, 0);
    // the four color rows are skipped: row 2 + 8 retargeted into the window
    assert_eq!(dst_file(mov[1]), 1);
    assert_eq!(dst_nr(mov[1]), 122);

    let write = words(&gen7, 1);
    assert_eq!((write[3] >> 25) & 0xf, 10); // message length covers oDepth

    let gen6 = compile(GEN6, MetaOp::ClearDepth);
    let mov6 = words(&gen6, 0);
    assert_eq!(dst_file(mov6[1]), 2);
    assert_eq!(dst_nr(mov6[1]), 10);
}

#[test]
fn sampler_fetch_descriptor_matches_the_simd16_ld_message() {
    let shader = compile(GEN75, MetaOp::CopyMem);
    let fetch = words(&shader, 3);

    assert_eq!(fetch[0] & 0x7f, 0x31);
    assert_eq!((fetch[0] >> 24) & 0xf, 2); // sampler shared function
    assert_eq!(fetch[3] & 0xff, 0); // texture surface
    assert_eq!((fetch[3] >> 12) & 0x1f, 7); // ld message
    assert_eq!((fetch[3] >> 17) & 0x3, 2); // SIMD16
    assert_eq!((fetch[3] >> 20) & 0x1f, 8); // response rows
    assert_eq!((fetch[3] >> 25) & 0xf, 2); // message rows
    assert_eq!((fetch[3] >> 19) & 0x1, 0); // no header

    // the response lands in the first texel slot
    assert_eq!(dst_file(fetch[1]), 1);
    assert_eq!(dst_nr(fetch[1]), 7);
}

#[test]
fn render_target_write_descriptor_matches_the_simd16_message() {
    let shader = compile(GEN75, MetaOp::ClearColor);
    let write = words(&shader, 4);

    assert_eq!(write[0] & 0x7f, 0x31);
    assert_eq!((write[0] >> 24) & 0xf, 5); // render-cache data port
    assert_eq!(write[3] & 0xff, 1); // render-target surface
    assert_eq!((write[3] >> 8) & 0x7, 0); // SIMD16 single source
    assert_ne!(write[3] & (1 << 12), 0); // last render target
    assert_eq!((write[3] >> 14) & 0xf, 0xc); // render-target write
    assert_eq!((write[3] >> 19) & 0x1, 0); // no header
    assert_eq!((write[3] >> 25) & 0xf, 8); // four color channels
    assert_ne!(write[3] & (1 << 31), 0); // end of thread
}

#[test]
fn payload_movs_copy_whole_simd16_rows() {
    let shader = compile(GEN75, MetaOp::CopyMem);

    // texel channel movs walk the staging slot two rows at a time
    for (index, channel) in (4..8).zip(0u32..) {
        let mov = words(&shader, index);
        assert_eq!(mov[0] & 0x7f, 0x01);
        assert_eq!(dst_nr(mov[1]), 114 + channel * 2);
        assert_eq!((mov[2] >> 5) & 0xff, 7 + channel * 2);
        assert_eq!((mov[2] >> 21) & 0xf, 5); // vstride 16
        assert_eq!((mov[2] >> 18) & 0x7, 4); // width 16
        assert_eq!((mov[2] >> 16) & 0x3, 1); // hstride 1
    }
}
