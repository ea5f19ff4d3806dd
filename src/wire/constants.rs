/// Network magic value used in the Bitmessage message header.
///
/// The first 4 bytes of every frame, sent big-endian (`E9 BE B4 D9`).
/// They identify the network and act as a message boundary marker in
/// the TCP stream.
pub const MAIN_NET_MAGIC: u32 = 0xE9BEB4D9;

/// Current Bitmessage protocol version, announced in the `version` message.
pub const PROTOCOL_VERSION: u32 = 3;

/// Size of the frame header: magic (4) + command (12) + length (4) + checksum (4).
pub const MESSAGE_HEADER_SIZE: usize = 24;

/// Width of the NUL-padded command field in the frame header.
pub const COMMAND_SIZE: usize = 12;

/// Largest payload any single message may carry.
///
/// Big enough for the largest `object` message Bitmessage relays
/// (2^18 bytes of object payload plus headroom for the outer fields).
pub const MAX_MESSAGE_PAYLOAD: usize = 1_600_003;

/// Maximum number of network addresses a single `addr` message may carry.
pub const MAX_ADDR_PER_MSG: usize = 1000;

/// Serialized size of one network address record:
///
/// ```text
/// timestamp (8) | stream (4) | services (8) | ip (16) | port (2)
/// ```
pub const NET_ADDRESS_SIZE: usize = 38;
