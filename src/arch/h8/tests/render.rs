use super::insn;
use crate::arch::h8::{render, RenderContext};
use crate::arch::Mode;
use crate::asm::gas::Gas;
use crate::asm::hew::Hew;
use crate::asm::Assembler;
use crate::ast::Label;
use crate::database::PortDatabase;

fn emit(asm: &dyn Assembler, data: &[u8], ctx: &RenderContext) -> String {
    let rendered = render(&insn(data, ctx.mode), ctx);
    let mut out = Vec::new();

    asm.emit_instr(&mut out, &rendered.instr).unwrap();

    String::from_utf8(out).unwrap()
}

macro_rules! assert_gas {
    ($mode: expr, $data: expr, $text: expr) => {
        assert_eq!(emit(&Gas, &$data, &RenderContext::new($mode)), $text)
    };
}

#[test]
fn h8_render_gas() {
    let mode = Mode::H8300A;

    assert_gas!(mode, [0x56, 0x70], "    rte\n");
    assert_gas!(mode, [0x54, 0x70], "    rts\n");
    assert_gas!(mode, [0x01, 0x00, 0x6D, 0xF6], "    push.l er6\n");
    assert_gas!(mode, [0x0F, 0xF6], "    mov.l sp,er6\n");
    assert_gas!(mode, [0x7A, 0x37, 0x00, 0x00, 0x00, 0x10], "    sub.l #0x10,sp\n");
    assert_gas!(mode, [0x0B, 0x97], "    adds #4,sp\n");
    assert_gas!(mode, [0xF8, 0x12], "    mov.b #0x12,r0l\n");
    assert_gas!(mode, [0x6F, 0x70, 0x00, 0x04], "    mov.w @(4:16,sp),r0\n");
    assert_gas!(mode, [0x6F, 0x70, 0xFF, 0xF0], "    mov.w @(-0x10:16,sp),r0\n");
    assert_gas!(mode, [0x01, 0x00, 0x6D, 0x01], "    mov.l @er0+,er1\n");
    assert_gas!(mode, [0x6C, 0xF8], "    mov.b r0l,@-sp\n");
    assert_gas!(mode, [0x59, 0x00], "    jmp @er0\n");
    assert_gas!(mode, [0x5F, 0x10], "    jsr @@0x10:8\n");
    assert_gas!(mode, [0x57, 0x20], "    trapa #2\n");
    assert_gas!(mode, [0x70, 0x38], "    bset #3,r0l\n");
    assert_gas!(mode, [0x03, 0x0B], "    ldc.b r3l,ccr\n");
}

#[test]
fn h8_render_absolute() {
    let data = [0x6A, 0x28, 0x00, 0x12, 0x34, 0x56];

    assert_gas!(Mode::H8300A, data, "    mov.b @0x123456:24,r0l\n");
    assert_gas!(Mode::H8SA, data, "    mov.b @0x123456:32,r0l\n");

    let reserved = [0x6A, 0x28, 0xAB, 0x12, 0x34, 0x56];

    assert_gas!(Mode::H8300A, reserved, "    mov.b @0x123456:24,r0l\n");
    assert_gas!(Mode::H8SA, reserved, "    mov.b @0x123456:32,r0l\n");
    assert_gas!(Mode::H8300A, [0x5A, 0x12, 0x34, 0x56], "    jmp @0x123456:24\n");
    assert_gas!(Mode::H8SA, [0x5A, 0x12, 0x34, 0x56], "    jmp @0x123456:24\n");
    assert_gas!(Mode::H8300A, [0x6A, 0x08, 0xFF, 0x10], "    mov.b @0xFFFF10:16,r0l\n");
    assert_gas!(Mode::H8300A, [0x28, 0x78], "    mov.b @0xFFFF78:8,r0l\n");
    assert_gas!(Mode::H8300A, [0x6A, 0x45, 0xFF, 0x20], "    movfpe @0xFFFF20:16,r5h\n");
    assert_gas!(Mode::H8300, [0x6A, 0xCB, 0xFF, 0x20], "    movtpe r3l,@0xFF20:16\n");
}

#[test]
fn h8_render_branches() {
    let mode = Mode::H8300A;

    assert_gas!(mode, [0x46, 0xFE], "    bne 0x1000\n");
    assert_gas!(mode, [0x58, 0x00, 0x01, 0x00], "    bra 0x1104:16\n");
    assert_gas!(mode, [0x55, 0x10], "    bsr 0x1012\n");
    assert_gas!(mode, [0x42, 0x00], "    bhi 0x1002\n");
}

#[test]
fn h8_render_register_lists() {
    assert_gas!(Mode::H8SA, [0x01, 0x10, 0x6D, 0x73], "    ldm.l @sp+,(er2-er3)\n");
    assert_gas!(Mode::H8SA, [0x01, 0x30, 0x6D, 0xF0], "    stm.l (er0-er3),@-sp\n");
    assert_gas!(Mode::H8SA, [0x10, 0x48], "    shll.b #2,r0l\n");
}

#[test]
fn h8_render_hew() {
    let ctx = RenderContext::new(Mode::H8300A);

    assert_eq!(
        emit(&Hew, &[0x7A, 0x37, 0x00, 0x00, 0x00, 0x10], &ctx),
        "    sub.l #H'10,sp\n"
    );
    assert_eq!(
        emit(&Hew, &[0x6A, 0x28, 0x00, 0x12, 0x34, 0x56], &ctx),
        "    mov.b @H'123456:24,r0l\n"
    );
    assert_eq!(
        emit(&Hew, &[0x6F, 0x70, 0xFF, 0xF0], &ctx),
        "    mov.w @(-H'10:16,sp),r0\n"
    );
}

#[test]
fn h8_render_ports() {
    let text = "SMR0 0xFFFF78 Serial mode register 0\n";
    let mut ports = PortDatabase::parse(text.as_bytes()).unwrap();
    let ctx = RenderContext::with_ports(Mode::H8SA, &ports);

    assert_eq!(emit(&Gas, &[0x28, 0x78], &ctx), "    mov.b @SMR0:8,r0l\n");
    assert_eq!(emit(&Gas, &[0x28, 0x79], &ctx), "    mov.b @0xFFFF79:8,r0l\n");

    ports.set_address_mask(Mode::H8300.address_mask());

    let ctx = RenderContext::with_ports(Mode::H8300, &ports);

    assert_eq!(emit(&Gas, &[0x28, 0x78], &ctx), "    mov.b @SMR0:8,r0l\n");
}

#[test]
fn h8_render_labels() {
    let ctx = RenderContext::new(Mode::H8300A);
    let rendered = render(&insn(&[0x46, 0xFE], ctx.mode), &ctx);
    let labelled = rendered
        .instr
        .replace_pointers(|ptr, is_code| match (ptr, is_code) {
            (0x1000, true) => Some(Label::new("loop")),
            _ => None,
        });
    let mut out = Vec::new();

    Gas.emit_instr(&mut out, &labelled).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "    bne loop\n");
}

#[test]
fn h8_render_length() {
    let ctx = RenderContext::new(Mode::H8300A);
    let cases: [&[u8]; 4] = [
        &[0x56, 0x70],
        &[0x01, 0x00, 0x6D, 0xF6],
        &[0x6A, 0x28, 0x00, 0x12, 0x34, 0x56],
        &[0x7A, 0x37, 0x00, 0x00, 0x00, 0x10],
    ];

    for data in cases.iter().copied() {
        let decoded = insn(data, ctx.mode);

        assert_eq!(render(&decoded, &ctx).consumed_length, decoded.len());
    }
}
