use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Name given to protocol numbers missing from [`IanaProtocol`].
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Well-known IANA protocol numbers found in flow logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum IanaProtocol {
    Icmp,
    Igmp,
    Tcp,
    Udp,
    Ipv6,
    Esp,
    Ah,
    #[strum(serialize = "ipv6-icmp")]
    Ipv6Icmp,
    Ospf,
    Pim,
    Sctp,
}

impl IanaProtocol {
    /// The decimal protocol number as it appears in a flow log.
    pub fn number(&self) -> &'static str {
        match self {
            IanaProtocol::Icmp => "1",
            IanaProtocol::Igmp => "2",
            IanaProtocol::Tcp => "6",
            IanaProtocol::Udp => "17",
            IanaProtocol::Ipv6 => "41",
            IanaProtocol::Esp => "50",
            IanaProtocol::Ah => "51",
            IanaProtocol::Ipv6Icmp => "58",
            IanaProtocol::Ospf => "89",
            IanaProtocol::Pim => "103",
            IanaProtocol::Sctp => "132",
        }
    }

    pub fn from_number(number: &str) -> Option<Self> {
        IanaProtocol::iter().find(|protocol| protocol.number() == number)
    }
}

/// Resolves a protocol number token to its lowercase name.
///
/// The token is matched as text, so `"06"` is not `tcp`.
pub fn resolve(number: &str) -> &'static str {
    IanaProtocol::from_number(number).map_or(UNKNOWN_PROTOCOL, |protocol| protocol.into())
}
