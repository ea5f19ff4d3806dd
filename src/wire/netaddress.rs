use std::fmt::{self, Debug, Formatter};
use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::wire::common::{read_ip, write_ip};
use crate::wire::error::Result;

/// Service flags advertised by a Bitmessage node.
///
/// A `u64` bitfield carried in every network address record. Unknown
/// bits are preserved as-is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ServiceFlag(u64);

impl ServiceFlag {
    /// Creates a new `ServiceFlag` from raw bits.
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bitfield value.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if all bits in `other` are set.
    pub const fn contains(self, other: ServiceFlag) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of both flag sets.
    pub const fn add(self, other: ServiceFlag) -> Self {
        Self(self.0 | other.0)
    }

    /// 0x00, no services.
    pub const NONE: ServiceFlag = ServiceFlag(0x00);

    /// 0x01, a normal network node that relays objects.
    pub const SF_NODE_NETWORK: ServiceFlag = ServiceFlag(0x01);

    pub fn names(self) -> Vec<&'static str> {
        if self.is_empty() {
            return vec!["NONE"];
        }

        let mut names = Vec::new();
        if self.contains(Self::SF_NODE_NETWORK) {
            names.push("SFNodeNetwork");
        }
        names
    }
}

impl From<u64> for ServiceFlag {
    fn from(value: u64) -> Self {
        ServiceFlag::new(value)
    }
}

impl Debug for ServiceFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ServiceFlag(NONE)");
        }

        let names = self.names().join(" | ");

        write!(f, "ServiceFlag({}) [0x{:016x}]", names, self.bits())
    }
}

/// A peer advertisement as carried by the `addr` message.
///
/// Wire layout, 38 bytes, big-endian:
///
/// ```text
/// u64  timestamp   seconds since the Unix epoch
/// u32  stream
/// u64  services
/// [16] ip          IPv4 is stored as ::ffff:a.b.c.d
/// u16  port
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetAddress {
    pub timestamp: u64,
    pub stream: u32,
    pub services: ServiceFlag,
    pub ip: Ipv6Addr,
    pub port: u16,
}

impl NetAddress {
    /// Builds a record for `addr`, stamped with the current time.
    ///
    /// Fails only if the system clock reads earlier than the Unix epoch.
    pub fn new(addr: SocketAddr, stream: u32, services: ServiceFlag) -> Result<Self> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(io::Error::other)?
            .as_secs();

        Ok(Self::new_with_timestamp(addr, now, stream, services))
    }

    /// Builds a record with a caller-supplied timestamp.
    pub fn new_with_timestamp(
        addr: SocketAddr,
        timestamp: u64,
        stream: u32,
        services: ServiceFlag,
    ) -> Self {
        Self {
            timestamp,
            stream,
            services,
            ip: canonical_ip(addr.ip()),
            port: addr.port(),
        }
    }

    /// The stored address with IPv4-mapped addresses turned back into IPv4.
    pub fn ip_addr(&self) -> IpAddr {
        match self.ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.ip),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip_addr(), self.port)
    }

    pub fn has_service(&self, service: ServiceFlag) -> bool {
        self.services.contains(service)
    }

    pub fn add_service(&mut self, service: ServiceFlag) {
        self.services = self.services.add(service);
    }
}

/// Maps every address onto the 16-byte IPv6 form used on the wire.
fn canonical_ip(ip: IpAddr) -> Ipv6Addr {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    }
}

/// Reads one 38-byte record.
pub fn read_net_address<R: Read + ?Sized>(r: &mut R) -> Result<NetAddress> {
    let timestamp = r.read_u64::<BigEndian>()?;
    let stream = r.read_u32::<BigEndian>()?;
    let services = ServiceFlag::from(r.read_u64::<BigEndian>()?);
    let ip = Ipv6Addr::from(read_ip(r)?);
    let port = r.read_u16::<BigEndian>()?;

    Ok(NetAddress {
        timestamp,
        stream,
        services,
        ip,
        port,
    })
}

/// Writes one 38-byte record.
pub fn write_net_address<W: Write + ?Sized>(w: &mut W, na: &NetAddress) -> Result<()> {
    w.write_u64::<BigEndian>(na.timestamp)?;
    w.write_u32::<BigEndian>(na.stream)?;
    w.write_u64::<BigEndian>(na.services.bits())?;
    write_ip(w, &na.ip.octets())?;
    w.write_u16::<BigEndian>(na.port)?;
    Ok(())
}
