use std::io::{Read, Write};

use crate::wire::common::{read_var_int, write_var_int};
use crate::wire::constants::{MAX_ADDR_PER_MSG, NET_ADDRESS_SIZE};
use crate::wire::error::{MessageError, Result};
use crate::wire::message::{Command, Message};
use crate::wire::netaddress::{read_net_address, write_net_address, NetAddress};

/// The `addr` message: a list of known peers.
///
/// Payload layout:
///
/// ```text
/// varint        count (at most MAX_ADDR_PER_MSG)
/// net_address[] count * 38 bytes
/// ```
///
/// Sent in reply to a new connection and to relay freshly learned peers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgAddr {
    pub addr_list: Vec<NetAddress>,
}

impl MsgAddr {
    /// Largest legal payload: a count of 1000 needs a 3-byte varint,
    /// followed by 1000 records.
    pub const MAX_PAYLOAD_LENGTH: usize = 3 + NET_ADDRESS_SIZE * MAX_ADDR_PER_MSG;

    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one address, refusing to grow past [`MAX_ADDR_PER_MSG`].
    pub fn add_address(&mut self, na: NetAddress) -> std::result::Result<(), MessageError> {
        if self.addr_list.len() + 1 > MAX_ADDR_PER_MSG {
            return Err(too_many("MsgAddr::add_address", self.addr_list.len() + 1));
        }

        self.addr_list.push(na);
        Ok(())
    }

    /// Appends a batch of addresses.
    ///
    /// The batch is refused whole if it would push the list past
    /// [`MAX_ADDR_PER_MSG`]; the list is left unchanged in that case.
    pub fn add_addresses(&mut self, addrs: &[NetAddress]) -> std::result::Result<(), MessageError> {
        let total = self.addr_list.len() + addrs.len();
        if total > MAX_ADDR_PER_MSG {
            return Err(too_many("MsgAddr::add_addresses", total));
        }

        self.addr_list.extend_from_slice(addrs);
        Ok(())
    }

    pub fn clear_addresses(&mut self) {
        self.addr_list.clear();
    }
}

fn too_many(func: &'static str, count: usize) -> MessageError {
    MessageError::new(
        func,
        format!("too many addresses in message [count {count}, max {MAX_ADDR_PER_MSG}]"),
    )
}

impl Message for MsgAddr {
    fn command(&self) -> Command {
        Command::Addr
    }

    fn max_payload_length(&self) -> usize {
        Self::MAX_PAYLOAD_LENGTH
    }

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        // Checked up front so an oversized list never reaches the wire.
        let count = self.addr_list.len();
        if count > MAX_ADDR_PER_MSG {
            return Err(too_many("MsgAddr::encode", count).into());
        }

        write_var_int(w, count as u64)?;
        for na in &self.addr_list {
            write_net_address(w, na)?;
        }

        Ok(())
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let count = read_var_int(r)?;

        // Refuse before allocating: the count comes straight off the wire.
        if count > MAX_ADDR_PER_MSG as u64 {
            return Err(too_many("MsgAddr::decode", count as usize).into());
        }

        let mut addr_list = Vec::with_capacity(count as usize);
        for _ in 0..count {
            addr_list.push(read_net_address(r)?);
        }

        Ok(Self { addr_list })
    }
}
