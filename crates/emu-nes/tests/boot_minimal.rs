//! Small programs run end to end through the NES memory map.
//!
//! Programs are loaded at $8000 and started there unless a test builds a
//! full 32K image with its own vectors.

use emu_core::BusError;
use emu_nes::{Nes, NesConfig};
use mos_6502::{CpuError, Registers};

fn boot_at_rom_start(program: &[u8]) -> Nes {
    Nes::new(&NesConfig::new(program.to_vec()).with_entry_point(0x8000))
        .expect("Failed to build NES")
}

/// 32K image with the reset and BRK vectors both pointing into it.
fn build_full_image(code: &[u8], handler: &[u8], handler_at: u16) -> Vec<u8> {
    let mut rom = vec![0xEA; 0x8000];
    rom[..code.len()].copy_from_slice(code);
    let offset = usize::from(handler_at - 0x8000);
    rom[offset..offset + handler.len()].copy_from_slice(handler);

    // Reset vector at $FFFC → $8000
    rom[0x7FFC] = 0x00;
    rom[0x7FFD] = 0x80;
    // IRQ/BRK vector at $FFFE → handler
    let [low, high] = handler_at.to_le_bytes();
    rom[0x7FFE] = low;
    rom[0x7FFF] = high;
    rom
}

#[test]
fn arithmetic_program_runs_to_end() {
    let mut nes = boot_at_rom_start(&[
        0xA9, 0x10, // LDA #$10
        0x69, 0x20, // ADC #$20
        0x69, 0xD0, // ADC #$D0
    ]);
    let executed = nes.run_while_in_program().expect("program runs");
    assert_eq!(executed, 3);
    let mismatches = nes
        .registers()
        .diff(&Registers::with(0x8006, 0x00, 0, 0, 0xFF, 0b0000_0011));
    assert!(mismatches.is_empty(), "{mismatches:?}");
}

#[test]
fn loop_and_subroutine() {
    let program = [
        0xA2, 0x05, // $8000: LDX #$05
        0x8A, // $8002: TXA
        0x9D, 0x00, 0x02, // $8003: STA $0200,X
        0xCA, // $8006: DEX
        0xD0, 0xF9, // $8007: BNE $8002
        0x20, 0x0F, 0x80, // $8009: JSR $800F
        0x4C, 0x00, 0x90, // $800C: JMP $9000 (leaves the image)
        0xA0, 0x77, // $800F: LDY #$77
        0x60, // $8011: RTS
    ];
    let mut nes = boot_at_rom_start(&program);
    let executed = nes.run_while_in_program().expect("program runs");

    assert_eq!(executed, 1 + 5 * 4 + 4);
    assert_eq!(nes.cpu().regs.pc, 0x9000);
    assert_eq!(nes.cpu().regs.y, 0x77);
    assert_eq!(nes.cpu().regs.s, 0xFF);
    for i in 1..=5_u16 {
        assert_eq!(nes.bus().peek_ram(0x0200 + i), i as u8);
    }
    assert_eq!(nes.bus().peek_ram(0x0200), 0x00);
}

#[test]
fn ppu_data_round_trip() {
    let program = [
        0xA9, 0x21, // LDA #$21
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x08, // LDA #$08
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x5A, // LDA #$5A
        0x8D, 0x07, 0x20, // STA $2007
        0xA9, 0x00, // LDA #$00
        0xAD, 0x07, 0x20, // LDA $2007
    ];
    let mut nes = boot_at_rom_start(&program);
    nes.run_while_in_program().expect("program runs");

    assert_eq!(nes.cpu().regs.a, 0x5A);
    assert_eq!(nes.bus().ppu.peek_vram(0x2108), 0x5A);
}

#[test]
fn ppu_data_before_address_fails() {
    let mut nes = boot_at_rom_start(&[
        0xA9, 0x3F, // LDA #$3F
        0x8D, 0x06, 0x20, // STA $2006 (high byte only)
        0x8D, 0x07, 0x20, // STA $2007
    ]);
    let err = nes.run_while_in_program().expect_err("incomplete address");
    assert_eq!(err, CpuError::Bus(BusError::PpuAddressIncomplete));
    assert_eq!(nes.cpu().regs.pc, 0x8005);
}

#[test]
fn vblank_poll_reads_status() {
    let program = [
        0xAD, 0x02, 0x20, // $8000: LDA $2002
        0x10, 0xFB, // $8003: BPL $8000
        0xA2, 0x01, // $8005: LDX #$01
    ];
    let mut nes = boot_at_rom_start(&program);
    nes.bus_mut().ppu.set_status(0x80);
    let executed = nes.run_while_in_program().expect("program runs");

    assert_eq!(executed, 3);
    assert_eq!(nes.cpu().regs.x, 0x01);
    assert_eq!(nes.cpu().regs.a, 0x80);
}

#[test]
fn reading_write_only_register_halts_with_registers_intact() {
    let mut nes = boot_at_rom_start(&[
        0xA9, 0x11, // LDA #$11
        0xAD, 0x00, 0x20, // LDA $2000
    ]);
    let err = nes.run_while_in_program().expect_err("write-only read");
    assert_eq!(
        err,
        CpuError::Bus(BusError::IllegalRead { address: 0x2000 })
    );
    assert_eq!(nes.cpu().regs.pc, 0x8002);
    assert_eq!(nes.cpu().regs.a, 0x11);
}

#[test]
fn absolute_loads_touch_only_the_target_byte() {
    // $1FFF is the last RAM mirror; the next address is write-only PPUCTRL.
    let mut nes = boot_at_rom_start(&[
        0xA9, 0x42, // LDA #$42
        0x8D, 0xFF, 0x1F, // STA $1FFF
        0xA9, 0x00, // LDA #$00
        0xAD, 0xFF, 0x1F, // LDA $1FFF
        0xA2, 0xFF, // LDX #$FF
        0xBC, 0x00, 0x1F, // LDY $1F00,X
        0xA0, 0xFF, // LDY #$FF
        0xBE, 0x00, 0x1F, // LDX $1F00,Y
    ]);
    let executed = nes.run_while_in_program().expect("program runs");
    assert_eq!(executed, 8);
    let regs = nes.registers();
    assert_eq!((regs.a, regs.x, regs.y), (0x42, 0x42, 0xFF));
    assert_eq!(nes.bus().peek_ram(0x07FF), 0x42);
}

#[test]
fn store_to_rom_fails() {
    let mut nes = boot_at_rom_start(&[
        0x8D, 0x00, 0x80, // STA $8000
    ]);
    let err = nes.step().expect_err("ROM write");
    assert_eq!(
        err,
        CpuError::Bus(BusError::IllegalWrite { address: 0x8000 })
    );
}

#[test]
fn unknown_opcode_halts() {
    let mut nes = boot_at_rom_start(&[0xEA, 0x02]);
    let err = nes.run_while_in_program().expect_err("undocumented opcode");
    assert_eq!(
        err,
        CpuError::UnknownOpcode {
            opcode: 0x02,
            address: 0x8001
        }
    );
    assert_eq!(nes.cpu().regs.pc, 0x8001);
    assert_eq!(nes.instruction_count(), 1);
}

#[test]
fn boots_through_reset_vector_and_services_brk() {
    let code = [
        0x00, // $8000: BRK
        0xEA, // $8001: padding byte skipped by BRK
        0xA2, 0x09, // $8002: LDX #$09
    ];
    let handler = [
        0xA9, 0x42, // LDA #$42
        0x40, // RTI
    ];
    let rom = build_full_image(&code, &handler, 0x8010);
    let mut nes = Nes::new(&NesConfig::new(rom)).expect("Failed to build NES");
    assert_eq!(
        nes.cpu().regs.pc,
        0x8000,
        "Reset vector should point to $8000"
    );

    assert_eq!(nes.run_for(4).expect("program runs"), 4);
    assert_eq!(nes.cpu().regs.a, 0x42);
    assert_eq!(nes.cpu().regs.x, 0x09);
    assert_eq!(nes.cpu().regs.pc, 0x8004);
    assert_eq!(nes.cpu().regs.s, 0xFF);
    assert_eq!(nes.cpu().regs.p.to_byte(), 0b0011_0000);
}
