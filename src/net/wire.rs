//! Datagram marshaling for the state/update packets exchanged between plant
//! and controller.
//!
//! The reference implementation copies each `f64` as 8 raw bytes in
//! sender-native order, which it flags in-source as only correct when both
//! endpoints share endianness. This serializes every double via its
//! IEEE-754 bit pattern in big-endian order instead, so the wire format is
//! byte-exact across architectures.

use std::io;

/// Plant -> controller: full state sample.
///
/// Wire layout (40 bytes): `time_us: u64 BE, angle: f64 BE, omega: f64 BE,
/// x: f64 BE, v: f64 BE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePacket {
    pub time_us: u64,
    pub angle: f64,
    pub omega: f64,
    pub x: f64,
    pub v: f64,
}

impl StatePacket {
    pub const WIRE_LEN: usize = 40;

    pub fn marshal(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[0..8].copy_from_slice(&self.time_us.to_be_bytes());
        buf[8..16].copy_from_slice(&self.angle.to_be_bytes());
        buf[16..24].copy_from_slice(&self.omega.to_be_bytes());
        buf[24..32].copy_from_slice(&self.x.to_be_bytes());
        buf[32..40].copy_from_slice(&self.v.to_be_bytes());
        buf
    }

    pub fn demarshal(data: &[u8]) -> io::Result<Self> {
        if data.len() < Self::WIRE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("short state packet: got {} bytes, need {}", data.len(), Self::WIRE_LEN),
            ));
        }
        Ok(Self {
            time_us: u64::from_be_bytes(data[0..8].try_into().unwrap()),
            angle: f64::from_be_bytes(data[8..16].try_into().unwrap()),
            omega: f64::from_be_bytes(data[16..24].try_into().unwrap()),
            x: f64::from_be_bytes(data[24..32].try_into().unwrap()),
            v: f64::from_be_bytes(data[32..40].try_into().unwrap()),
        })
    }
}

/// Plant -> controller, legacy profile: angle only, no velocity state.
/// Kept as an explicit opt-in alongside `StatePacket`, never the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyStatePacket {
    pub time_us: u64,
    pub angle: f64,
}

impl LegacyStatePacket {
    pub const WIRE_LEN: usize = 16;

    pub fn marshal(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[0..8].copy_from_slice(&self.time_us.to_be_bytes());
        buf[8..16].copy_from_slice(&self.angle.to_be_bytes());
        buf
    }

    pub fn demarshal(data: &[u8]) -> io::Result<Self> {
        if data.len() < Self::WIRE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("short legacy state packet: got {} bytes, need {}", data.len(), Self::WIRE_LEN),
            ));
        }
        Ok(Self {
            time_us: u64::from_be_bytes(data[0..8].try_into().unwrap()),
            angle: f64::from_be_bytes(data[8..16].try_into().unwrap()),
        })
    }
}

/// Controller -> plant: computed actuation force.
///
/// Wire layout (16 bytes): `time_us: u64 BE, u: f64 BE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdatePacket {
    pub time_us: u64,
    pub u: f64,
}

impl UpdatePacket {
    pub const WIRE_LEN: usize = 16;

    pub fn marshal(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[0..8].copy_from_slice(&self.time_us.to_be_bytes());
        buf[8..16].copy_from_slice(&self.u.to_be_bytes());
        buf
    }

    pub fn demarshal(data: &[u8]) -> io::Result<Self> {
        if data.len() < Self::WIRE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("short update packet: got {} bytes, need {}", data.len(), Self::WIRE_LEN),
            ));
        }
        Ok(Self {
            time_us: u64::from_be_bytes(data[0..8].try_into().unwrap()),
            u: f64::from_be_bytes(data[8..16].try_into().unwrap()),
        })
    }
}
