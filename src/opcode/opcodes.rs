/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use self::OpCode::*;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Register pairs as named by the instruction set: `B` is BC, `D` is DE and `H` is HL.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Reg16 {
    B,
    D,
    H,
    SP,
}

impl Display for Reg16 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Flag tested by a conditional jump, call or return.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    /// Decodes the `ccc` field (bits 3..5) of a conditional opcode.
    pub fn from_bits(bits: u8) -> Condition {
        match bits & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    fn suffix(&self) -> &'static str {
        match *self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpCode {
    Nop,
    Lxi(Reg16, u16),
    StaxB,
    StaxD,
    LdaxB,
    LdaxD,
    Inx(Reg16),
    Dcx(Reg16),
    Inr(Register),
    InrM,
    Dcr(Register),
    DcrM,
    Mvi(Register, u8),
    MviM(u8),
    Dad(Reg16),
    Rlc,
    Rrc,
    Ral,
    Rar,
    Shld(u16),
    Lhld(u16),
    Daa,
    Cma,
    Sta(u16),
    Lda(u16),
    Stc,
    Cmc,

    Mov(Register, Register),
    MovToM(Register),
    MovFromM(Register),
    Hlt,

    Add(Register),
    AddM,
    Adc(Register),
    AdcM,
    Sub(Register),
    SubM,
    Sbb(Register),
    SbbM,
    Ana(Register),
    AnaM,
    Xra(Register),
    XraM,
    Ora(Register),
    OraM,
    Cmp(Register),
    CmpM,

    Adi(u8),
    Aci(u8),
    Sui(u8),
    Sbi(u8),
    Ani(u8),
    Xri(u8),
    Ori(u8),
    Cpi(u8),

    Jmp(u16),
    JmpIf(Condition, u16),
    Call(u16),
    CallIf(Condition, u16),
    Ret,
    RetIf(Condition),
    Rst(u8),
    Pchl,

    Push(Reg16),
    PushPSW,
    Pop(Reg16),
    PopPSW,
    Xthl,
    Sphl,
    Xchg,
    In(u8),
    Out(u8),
    Ei,
    Di,
}

impl Display for OpCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Nop => write!(f, "NOP"),
            Lxi(reg, v) => write!(f, "LXI {},#${:04x}", reg, v),
            StaxB => write!(f, "STAX B"),
            StaxD => write!(f, "STAX D"),
            LdaxB => write!(f, "LDAX B"),
            LdaxD => write!(f, "LDAX D"),
            Inx(reg) => write!(f, "INX {}", reg),
            Dcx(reg) => write!(f, "DCX {}", reg),
            Inr(reg) => write!(f, "INR {}", reg),
            InrM => write!(f, "INR M"),
            Dcr(reg) => write!(f, "DCR {}", reg),
            DcrM => write!(f, "DCR M"),
            Mvi(reg, v) => write!(f, "MVI {},#${:02x}", reg, v),
            MviM(v) => write!(f, "MVI M,#${:02x}", v),
            Dad(reg) => write!(f, "DAD {}", reg),
            Rlc => write!(f, "RLC"),
            Rrc => write!(f, "RRC"),
            Ral => write!(f, "RAL"),
            Rar => write!(f, "RAR"),
            Shld(adr) => write!(f, "SHLD ${:04x}", adr),
            Lhld(adr) => write!(f, "LHLD ${:04x}", adr),
            Daa => write!(f, "DAA"),
            Cma => write!(f, "CMA"),
            Sta(adr) => write!(f, "STA ${:04x}", adr),
            Lda(adr) => write!(f, "LDA ${:04x}", adr),
            Stc => write!(f, "STC"),
            Cmc => write!(f, "CMC"),

            Mov(reg1, reg2) => write!(f, "MOV {},{}", reg1, reg2),
            MovToM(reg) => write!(f, "MOV M,{}", reg),
            MovFromM(reg) => write!(f, "MOV {},M", reg),
            Hlt => write!(f, "HLT"),

            Add(reg) => write!(f, "ADD {}", reg),
            AddM => write!(f, "ADD M"),
            Adc(reg) => write!(f, "ADC {}", reg),
            AdcM => write!(f, "ADC M"),
            Sub(reg) => write!(f, "SUB {}", reg),
            SubM => write!(f, "SUB M"),
            Sbb(reg) => write!(f, "SBB {}", reg),
            SbbM => write!(f, "SBB M"),
            Ana(reg) => write!(f, "ANA {}", reg),
            AnaM => write!(f, "ANA M"),
            Xra(reg) => write!(f, "XRA {}", reg),
            XraM => write!(f, "XRA M"),
            Ora(reg) => write!(f, "ORA {}", reg),
            OraM => write!(f, "ORA M"),
            Cmp(reg) => write!(f, "CMP {}", reg),
            CmpM => write!(f, "CMP M"),

            Adi(v) => write!(f, "ADI #${:02x}", v),
            Aci(v) => write!(f, "ACI #${:02x}", v),
            Sui(v) => write!(f, "SUI #${:02x}", v),
            Sbi(v) => write!(f, "SBI #${:02x}", v),
            Ani(v) => write!(f, "ANI #${:02x}", v),
            Xri(v) => write!(f, "XRI #${:02x}", v),
            Ori(v) => write!(f, "ORI #${:02x}", v),
            Cpi(v) => write!(f, "CPI #${:02x}", v),

            Jmp(adr) => write!(f, "JMP ${:04x}", adr),
            JmpIf(cond, adr) => write!(f, "J{} ${:04x}", cond.suffix(), adr),
            Call(adr) => write!(f, "CALL ${:04x}", adr),
            CallIf(cond, adr) => write!(f, "C{} ${:04x}", cond.suffix(), adr),
            Ret => write!(f, "RET"),
            RetIf(cond) => write!(f, "R{}", cond.suffix()),
            Rst(v) => write!(f, "RST {}", v),
            Pchl => write!(f, "PCHL"),

            Push(reg) => write!(f, "PUSH {}", reg),
            PushPSW => write!(f, "PUSH PSW"),
            Pop(reg) => write!(f, "POP {}", reg),
            PopPSW => write!(f, "POP PSW"),
            Xthl => write!(f, "XTHL"),
            Sphl => write!(f, "SPHL"),
            Xchg => write!(f, "XCHG"),
            In(port) => write!(f, "IN #${:02x}", port),
            Out(port) => write!(f, "OUT #${:02x}", port),
            Ei => write!(f, "EI"),
            Di => write!(f, "DI"),
        }
    }
}
