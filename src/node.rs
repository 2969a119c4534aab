//! Peer node identity: enode text form, wire form, and the synthetic-id
//! fallback for endpoints configured without key material.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;
use std::str::FromStr;

use rlp::{Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use crate::crypto::synthetic_node_id;
use crate::error::{ChainError, Result};

/// The only URI scheme a peer identity string may carry.
pub const ENODE_SCHEME: &str = "enode";

/// A network peer, as seen by discovery and handshake logic.
///
/// Equality and hashing are defined solely by the id bytes; two nodes that
/// moved between addresses still compare equal, and an empty id is a legal
/// "not yet identified" value rather than an error state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: Vec<u8>,
    pub host: String,
    pub port: u16,
    synthetic: bool,
}

impl Node {
    pub fn new(id: Vec<u8>, host: String, port: u16) -> Self {
        Node {
            id,
            host,
            port,
            synthetic: false,
        }
    }

    /// Parses either an `enode://<hex-id>@host:port` URL or a bare
    /// `host:port` address.
    ///
    /// The bare form carries no key material, so a placeholder id is derived
    /// by reading `keccak256(text)` as a secret key and taking the resulting
    /// public key bytes. The same text yields a byte-identical id on every
    /// call; nodes built this way are flagged [`Node::is_synthetic`].
    pub fn parse(text: &str) -> Result<Self> {
        if let Some((scheme, rest)) = text.split_once("://") {
            if scheme != ENODE_SCHEME {
                return Err(ChainError::Format(format!(
                    "Expecting URL in the format enode://PUBKEY@HOST:PORT, got scheme '{}'",
                    scheme
                )));
            }
            let (hex_id, address) = rest.split_once('@').ok_or_else(|| {
                ChainError::Format(
                    "Expecting URL in the format enode://PUBKEY@HOST:PORT".to_string(),
                )
            })?;
            let id = hex::decode(hex_id)?;
            let (host, port) = split_host_port(address)?;
            return Ok(Node::new(id, host, port));
        }

        let (host, port) = split_host_port(text)?;
        let id = synthetic_node_id(text)?;
        Ok(Node {
            id: id.to_vec(),
            host,
            port,
            synthetic: true,
        })
    }

    /// Decodes a wire record: `[host, udp_port, tcp_port]` or
    /// `[host, udp_port, tcp_port, id]`. The 3-element form is a
    /// discovery-only endpoint and yields an empty id.
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let rlp = Rlp::new(bytes);
        let count = rlp.item_count()?;
        if count < 3 {
            return Err(ChainError::Format(format!(
                "Node record needs at least 3 elements, got {}",
                count
            )));
        }
        let host_bytes: Vec<u8> = rlp.val_at(0)?;
        let port: u16 = rlp.val_at(1)?;
        let id = if count > 3 {
            rlp.val_at(count - 1)?
        } else {
            Vec::new()
        };
        Ok(Node {
            id,
            host: bytes_to_host(&host_bytes)?,
            port,
            synthetic: false,
        })
    }

    /// Full wire record `[host, udp_port, tcp_port, id]`. Both port slots
    /// carry the node's single configured port.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(4);
        s.append(&host_to_bytes(&self.host));
        s.append(&self.port);
        s.append(&self.port);
        s.append(&self.id);
        s.out().to_vec()
    }

    /// Brief wire record `[host, udp_port, tcp_port]`, used where only the
    /// endpoint matters (discovery targets).
    pub fn to_wire_brief(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(3);
        s.append(&host_to_bytes(&self.host));
        s.append(&self.port);
        s.append(&self.port);
        s.out().to_vec()
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Lowercase hex rendering of the id bytes.
    pub fn hex_id(&self) -> String {
        hex::encode(&self.id)
    }

    /// True when the id was derived from the address text rather than a
    /// real key. Metadata only; never part of equality.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

impl FromStr for Node {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        Node::parse(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "enode://{}@[{}]:{}", self.hex_id(), self.host, self.port)
        } else {
            write!(f, "enode://{}@{}:{}", self.hex_id(), self.host, self.port)
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Splits `host:port`, accepting bracketed IPv6 literals (`[::1]:30303`).
fn split_host_port(address: &str) -> Result<(String, u16)> {
    let (host, port_text) = if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| {
            ChainError::Format(format!("Unterminated IPv6 literal in '{}'", address))
        })?;
        let port_text = tail.strip_prefix(':').ok_or_else(|| {
            ChainError::Format(format!("Missing port in '{}'", address))
        })?;
        (host, port_text)
    } else {
        address
            .rsplit_once(':')
            .ok_or_else(|| ChainError::Format(format!("Missing port in '{}'", address)))?
    };
    if host.is_empty() {
        return Err(ChainError::Format(format!("Missing host in '{}'", address)));
    }
    let port = port_text
        .parse::<u16>()
        .map_err(|_| ChainError::Format(format!("Invalid port '{}'", port_text)))?;
    Ok((host.to_string(), port))
}

/// IP literals travel as their raw octets (4 for v4, 16 for v6); anything
/// else passes through as UTF-8 hostname bytes.
fn host_to_bytes(host: &str) -> Vec<u8> {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => ip.octets().to_vec(),
        Ok(IpAddr::V6(ip)) => ip.octets().to_vec(),
        Err(_) => host.as_bytes().to_vec(),
    }
}

fn bytes_to_host(bytes: &[u8]) -> Result<String> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::from(octets).to_string());
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::from(octets).to_string());
    }
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ChainError::Format("Host bytes are not valid UTF-8".to_string()))
}
