// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bus transport contract shared by the scanner, the verifier and the hardware adapter.
//!
//! - `Address` is a validated 7-bit bus address.
//! - `BusError` is the failure taxonomy a transport reports.
//! - `Status` is the outcome code stored in the diagnostic record. Its numeric values match what a
//!   debugger shows for the vendor HAL (`0x00` OK .. `0x03` TIMEOUT).

use core::fmt;

/// Highest valid 7-bit address.
pub const ADDRESS_MAX: u8 = 0x7F;

/// A 7-bit bus address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address(u8);

impl Address {
    /// Build an address from its 7-bit value. Returns `None` above `0x7F`.
    #[inline]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= ADDRESS_MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Address 0 is the general-call address and is never probed.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Failure reported by a bus transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BusError {
    /// NACK, arbitration loss, bus error or anything else the peripheral flags.
    Error,
    /// The bus or the peripheral was still busy with another transfer.
    Busy,
    /// The transaction did not finish within its time budget.
    Timeout,
}

/// Outcome code of a single transaction, as kept in the diagnostic record.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Status {
    #[default]
    Ok = 0x00,
    Error = 0x01,
    Busy = 0x02,
    Timeout = 0x03,
}

impl Status {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<BusError> for Status {
    fn from(err: BusError) -> Self {
        match err {
            BusError::Error => Status::Error,
            BusError::Busy => Status::Busy,
            BusError::Timeout => Status::Timeout,
        }
    }
}

impl From<Result<(), BusError>> for Status {
    fn from(res: Result<(), BusError>) -> Self {
        match res {
            Ok(()) => Status::Ok,
            Err(e) => e.into(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "OK",
            Status::Error => "ERROR",
            Status::Busy => "BUSY",
            Status::Timeout => "TIMEOUT",
        };
        f.write_str(name)
    }
}

/// Blocking bus primitives with a per-call timeout in milliseconds.
///
/// `offset` is the 8-bit position inside the target's addressable storage. `read` fills the whole
/// of `buf`, so its length is the number of bytes requested. On failure `buf` may hold a partial
/// transfer.
pub trait Transport {
    /// Zero-payload transaction that only checks whether `addr` acknowledges.
    fn probe(&mut self, addr: Address, timeout_ms: u32) -> Result<(), BusError>;

    fn write(
        &mut self,
        addr: Address,
        offset: u8,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), BusError>;

    fn read(
        &mut self,
        addr: Address,
        offset: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), BusError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    #[inline]
    fn probe(&mut self, addr: Address, timeout_ms: u32) -> Result<(), BusError> {
        (**self).probe(addr, timeout_ms)
    }

    #[inline]
    fn write(
        &mut self,
        addr: Address,
        offset: u8,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        (**self).write(addr, offset, bytes, timeout_ms)
    }

    #[inline]
    fn read(
        &mut self,
        addr: Address,
        offset: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        (**self).read(addr, offset, buf, timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_rejects_eight_bit_values() {
        assert_eq!(Address::new(0x7F).map(Address::raw), Some(0x7F));
        assert!(Address::new(0x80).is_none());
        assert!(Address::new(0).unwrap().is_reserved());
    }

    #[test]
    fn status_codes_match_debugger_values() {
        assert_eq!(Status::Ok.code(), 0x00);
        assert_eq!(Status::Error.code(), 0x01);
        assert_eq!(Status::Busy.code(), 0x02);
        assert_eq!(Status::Timeout.code(), 0x03);
    }

    #[test]
    fn status_from_result() {
        assert_eq!(Status::from(Ok(())), Status::Ok);
        assert_eq!(Status::from(Err(BusError::Busy)), Status::Busy);
        assert_eq!(Status::from(Err(BusError::Timeout)), Status::Timeout);
    }

    #[test]
    fn address_displays_as_hex() {
        use std::string::ToString;

        assert_eq!(Address::new(0x50).unwrap().to_string(), "0x50");
        assert_eq!(Address::new(0x08).unwrap().to_string(), "0x08");
    }
}
