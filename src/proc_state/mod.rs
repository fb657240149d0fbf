/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

pub mod alu;
mod flags;
mod registers;

use std::fmt;

use crate::bus::DataBus;
use crate::error::EmulationError;
use crate::opcode::{self, Condition, OpCode, Reg16};
use crate::opcode::OpCode::*;
pub use self::flags::Flags;
pub use self::registers::Registers;

/// Clock states spent by a stopped processor on each call to `emulate`.
pub const IDLE_CYCLES: u32 = 4;

/// Clock states of the `RST` forced by an accepted interrupt.
pub const INTERRUPT_CYCLES: u32 = 11;

/// What a call to [`Proc8080::emulate`](struct.Proc8080.html#method.emulate) consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Length of the executed instruction, 0 when the processor is stopped.
    pub bytes: u16,
    /// Clock states spent.
    pub cycles: u32,
}

/// Structure containing the processor state (flags and registers) and logic.
///
/// Memory and I/O ports belong to the machine: every instruction reaches them through the
/// [`DataBus`](../bus/trait.DataBus.html) given to `emulate`.
#[derive(Clone, Default)]
pub struct Proc8080 {
    flags: Flags,
    registers: Registers,
    cycles: u64,
    interrupt_enabled: bool,
    stopped: bool,
}

impl Proc8080 {
    /// Builds a processor in its power-on state: every register is cleared except the stack
    /// pointer, interrupts are disabled and the program counter is 0.
    pub fn new() -> Proc8080 {
        Default::default()
    }

    /// Borrows the procesor flags immutably.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    /// Borrows the procesor registers immutably.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// State of the interrupt enable latch, driven by `EI` and `DI`.
    pub fn interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    /// True after a `HLT`, until an interrupt is accepted.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Cycles elapsed since the cpu was created
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Reads the next opcode in memory and changes state accordingly.
    ///
    /// This methods run one `step` of the processor simulation. It reads the opcode at the
    /// program counter and its operands, moves the program counter past the instruction and
    /// applies it. Jumps, calls and returns then overwrite the program counter.
    ///
    /// # Errors
    /// An opcode outside the documented instruction set is fatal. The processor is left
    /// untouched, with the program counter on the offending byte.
    pub fn emulate<Bus: DataBus>(&mut self, bus: &mut Bus) -> Result<Step, EmulationError> {
        if self.stopped {
            self.cycles += IDLE_CYCLES as u64;
            return Ok(Step { bytes: 0, cycles: IDLE_CYCLES });
        }

        let address = self.registers.pc;
        let opcode = bus.read_byte(address);
        let unimplemented = || EmulationError::UnimplementedOpcode { opcode, address };
        let info = opcode::op_info(opcode).ok_or_else(unimplemented)?;
        let data_byte = if info.size >= 2 { bus.read_byte(address.wrapping_add(1)) } else { 0 };
        let data_u16 = if info.size == 3 { bus.read_word(address.wrapping_add(1)) } else { 0 };
        let op = opcode::decode(opcode, data_byte, data_u16).ok_or_else(unimplemented)?;

        log::trace!("{:04x} - {}", address, op);
        self.registers.pc = address.wrapping_add(info.size as u16);
        let taken = self.apply_op(op, bus);

        let cycles = if taken { info.cycles_taken } else { info.cycles } as u32;
        self.cycles += cycles as u64;
        Ok(Step { bytes: info.size as u16, cycles })
    }

    /// Make the processor run a `RST` instruction.
    ///
    /// There are 8 possible `RST` instruction for the 8080 (`RST 0` to `7`). The specific
    /// instruction is chosen via `rst_value`: the current program counter is pushed and the
    /// processor jumps to `rst_value * 8`, no byte is read at the program counter.
    ///
    /// The interrupt is only honored when interrupts are enabled. Accepting it disables them
    /// until the program runs `EI` again, and restarts a processor stopped by `HLT`. Returns
    /// whether the interrupt was accepted.
    ///
    /// # Panics
    /// If `rst_value` is greater than 7;
    pub fn interrupt<Bus: DataBus>(&mut self, bus: &mut Bus, rst_value: u8) -> bool {
        assert!(rst_value <= 7, "RST value are only from 0 to 7");
        if !self.interrupt_enabled {
            log::trace!("interrupt {} ignored, interrupts are disabled", rst_value);
            return false;
        }
        log::debug!("interrupt {} accepted at {:04x}", rst_value, self.registers.pc);
        self.interrupt_enabled = false;
        self.stopped = false;
        self.apply_call(bus, rst_value as u16 * 8);
        self.cycles += INTERRUPT_CYCLES as u64;
        true
    }

    /// Applies an already decoded opcode. The program counter must already point past it.
    ///
    /// Returns true when a conditional call or return took its branch.
    fn apply_op<Bus: DataBus>(&mut self, op: OpCode, bus: &mut Bus) -> bool {
        match op {
            Nop => (),

            // Data transfer
            Mov(reg1, reg2) => self.registers.apply_mov(reg1, reg2),
            MovFromM(reg) => {
                let value = bus.read_byte(self.registers.hl());
                self.registers.set_reg_val(reg, value);
            }
            MovToM(reg) => bus.write_byte(self.registers.hl(), self.registers.reg_val(reg)),
            Mvi(reg, value) => self.registers.set_reg_val(reg, value),
            MviM(value) => bus.write_byte(self.registers.hl(), value),
            Lxi(reg, value) => self.registers.set_reg_16_val(reg, value),
            Lda(addr) => self.registers.a = bus.read_byte(addr),
            Sta(addr) => bus.write_byte(addr, self.registers.a),
            Lhld(addr) => {
                let value = bus.read_word(addr);
                self.registers.set_reg_16_val(Reg16::H, value);
            }
            Shld(addr) => bus.write_word(addr, self.registers.hl()),
            LdaxB => self.registers.a = bus.read_byte(self.registers.reg_16_val(Reg16::B)),
            LdaxD => self.registers.a = bus.read_byte(self.registers.reg_16_val(Reg16::D)),
            StaxB => bus.write_byte(self.registers.reg_16_val(Reg16::B), self.registers.a),
            StaxD => bus.write_byte(self.registers.reg_16_val(Reg16::D), self.registers.a),
            Xchg => self.xchg(),

            // Arithmetic
            Add(reg) => self.add(self.registers.reg_val(reg), false),
            AddM => self.add(bus.read_byte(self.registers.hl()), false),
            Adi(value) => self.add(value, false),
            Adc(reg) => self.add(self.registers.reg_val(reg), self.flags.cy),
            AdcM => self.add(bus.read_byte(self.registers.hl()), self.flags.cy),
            Aci(value) => self.add(value, self.flags.cy),
            Sub(reg) => self.sub(self.registers.reg_val(reg), false),
            SubM => self.sub(bus.read_byte(self.registers.hl()), false),
            Sui(value) => self.sub(value, false),
            Sbb(reg) => self.sub(self.registers.reg_val(reg), self.flags.cy),
            SbbM => self.sub(bus.read_byte(self.registers.hl()), self.flags.cy),
            Sbi(value) => self.sub(value, self.flags.cy),
            Inr(reg) => {
                let result = alu::inr(&mut self.flags, self.registers.reg_val(reg));
                self.registers.set_reg_val(reg, result);
            }
            InrM => {
                let addr = self.registers.hl();
                let result = alu::inr(&mut self.flags, bus.read_byte(addr));
                bus.write_byte(addr, result);
            }
            Dcr(reg) => {
                let result = alu::dcr(&mut self.flags, self.registers.reg_val(reg));
                self.registers.set_reg_val(reg, result);
            }
            DcrM => {
                let addr = self.registers.hl();
                let result = alu::dcr(&mut self.flags, bus.read_byte(addr));
                bus.write_byte(addr, result);
            }
            Inx(reg) => {
                let value = self.registers.reg_16_val(reg).wrapping_add(1);
                self.registers.set_reg_16_val(reg, value);
            }
            Dcx(reg) => {
                let value = self.registers.reg_16_val(reg).wrapping_sub(1);
                self.registers.set_reg_16_val(reg, value);
            }
            Dad(reg) => {
                let value = self.registers.reg_16_val(reg);
                let result = alu::dad(&mut self.flags, self.registers.hl(), value);
                self.registers.set_reg_16_val(Reg16::H, result);
            }
            Daa => self.registers.a = alu::daa(&mut self.flags, self.registers.a),

            // Logical
            Ana(reg) => self.and(self.registers.reg_val(reg)),
            AnaM => self.and(bus.read_byte(self.registers.hl())),
            Ani(value) => self.and(value),
            Xra(reg) => self.xor(self.registers.reg_val(reg)),
            XraM => self.xor(bus.read_byte(self.registers.hl())),
            Xri(value) => self.xor(value),
            Ora(reg) => self.or(self.registers.reg_val(reg)),
            OraM => self.or(bus.read_byte(self.registers.hl())),
            Ori(value) => self.or(value),
            Cmp(reg) => self.compare(self.registers.reg_val(reg)),
            CmpM => self.compare(bus.read_byte(self.registers.hl())),
            Cpi(value) => self.compare(value),
            Rlc => self.registers.a = alu::rlc(&mut self.flags, self.registers.a),
            Rrc => self.registers.a = alu::rrc(&mut self.flags, self.registers.a),
            Ral => self.registers.a = alu::ral(&mut self.flags, self.registers.a),
            Rar => self.registers.a = alu::rar(&mut self.flags, self.registers.a),
            Cma => self.registers.a = !self.registers.a,
            Cmc => self.flags.cy = !self.flags.cy,
            Stc => self.flags.cy = true,

            // Branch
            Jmp(addr) => self.registers.pc = addr,
            JmpIf(cond, addr) => {
                if self.condition(cond) {
                    self.registers.pc = addr;
                }
            }
            Call(addr) => self.apply_call(bus, addr),
            CallIf(cond, addr) => {
                if self.condition(cond) {
                    self.apply_call(bus, addr);
                    return true;
                }
            }
            Ret => self.apply_return(bus),
            RetIf(cond) => {
                if self.condition(cond) {
                    self.apply_return(bus);
                    return true;
                }
            }
            Rst(value) => self.apply_call(bus, value as u16 * 8),
            Pchl => self.registers.pc = self.registers.hl(),

            // Stack, I/O, and Machine Control
            Push(reg) => {
                let value = self.registers.reg_16_val(reg);
                self.registers.push(bus, value);
            }
            PushPSW => {
                let psw = self.flags.to_processor_status_word();
                let value = u16::from_be_bytes([self.registers.a, psw]);
                self.registers.push(bus, value);
            }
            Pop(reg) => {
                let value = self.registers.pop(bus);
                self.registers.set_reg_16_val(reg, value);
            }
            PopPSW => {
                let [a, psw] = self.registers.pop(bus).to_be_bytes();
                self.registers.a = a;
                self.flags = Flags::from_processor_status_word(psw);
            }
            Xthl => {
                let sp = self.registers.sp;
                let stacked = bus.read_word(sp);
                bus.write_word(sp, self.registers.hl());
                self.registers.set_reg_16_val(Reg16::H, stacked);
            }
            Sphl => self.registers.sp = self.registers.hl(),
            In(port) => self.registers.a = bus.read_port(port),
            Out(port) => bus.write_port(port, self.registers.a),
            Ei => self.interrupt_enabled = true,
            Di => self.interrupt_enabled = false,
            Hlt => self.stopped = true,
        }
        false
    }

    fn condition(&self, cond: Condition) -> bool {
        match cond {
            Condition::NotZero => !self.flags.z,
            Condition::Zero => self.flags.z,
            Condition::NoCarry => !self.flags.cy,
            Condition::Carry => self.flags.cy,
            Condition::ParityOdd => !self.flags.p,
            Condition::ParityEven => self.flags.p,
            Condition::Plus => !self.flags.s,
            Condition::Minus => self.flags.s,
        }
    }

    fn xchg(&mut self) {
        let d = self.registers.reg_16_val(Reg16::D);
        let h = self.registers.reg_16_val(Reg16::H);

        self.registers.set_reg_16_val(Reg16::D, h);
        self.registers.set_reg_16_val(Reg16::H, d);
    }

    fn add(&mut self, value: u8, carry: bool) {
        self.registers.a = alu::add(&mut self.flags, self.registers.a, value, carry);
    }

    fn sub(&mut self, value: u8, borrow: bool) {
        self.registers.a = alu::sub(&mut self.flags, self.registers.a, value, borrow);
    }

    fn and(&mut self, value: u8) {
        self.registers.a = alu::and(&mut self.flags, self.registers.a, value);
    }

    fn xor(&mut self, value: u8) {
        self.registers.a = alu::xor(&mut self.flags, self.registers.a, value);
    }

    fn or(&mut self, value: u8) {
        self.registers.a = alu::or(&mut self.flags, self.registers.a, value);
    }

    fn compare(&mut self, value: u8) {
        alu::sub(&mut self.flags, self.registers.a, value, false);
    }

    fn apply_call<Bus: DataBus>(&mut self, bus: &mut Bus, addr: u16) {
        let pc = self.registers.pc;
        self.registers.push(bus, pc);
        self.registers.pc = addr;
    }

    fn apply_return<Bus: DataBus>(&mut self, bus: &mut Bus) {
        self.registers.pc = self.registers.pop(bus);
    }
}

impl fmt::Debug for Proc8080 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{
    flags: {:x?},
    registers: {:x?},
    interrupt_enabled: {:?},
    stopped: {:?},
}}", self.flags, self.registers, self.interrupt_enabled, self.stopped)
    }
}
