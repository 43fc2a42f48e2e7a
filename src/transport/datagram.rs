//! UDP datagram transport
//!
//! Constructed only for host+port destinations. The host must already be a
//! literal IPv4 or IPv6 address; the socket binds to the matching wildcard
//! address. Rendered messages pass through the fragmentation protocol, so a
//! send is all frames or nothing.

use super::fragment;
use crate::core::{LogError, LogValue, Result, Severity, SharedConfig};
use crate::format::Formatter;
use crate::locator::Locator;
use std::net::{IpAddr, SocketAddr, UdpSocket};

pub struct DatagramTransport {
    id: String,
    socket: UdpSocket,
    peer: SocketAddr,
    formatter: Box<dyn Formatter>,
    config: SharedConfig,
}

impl DatagramTransport {
    pub fn new(
        id: &str,
        locator: &Locator,
        formatter: Box<dyn Formatter>,
        config: SharedConfig,
    ) -> Result<Self> {
        let port = locator
            .port
            .ok_or_else(|| LogError::locator(locator.host.as_deref().unwrap_or(""), "udp port required"))?;
        let host = locator.host.clone().unwrap_or_default();
        let ip: IpAddr = host
            .parse()
            .map_err(|_| LogError::InvalidHost { host: host.clone() })?;

        let bind_addr = match ip {
            IpAddr::V4(_) => "0.0.0.0:0",
            IpAddr::V6(_) => "[::]:0",
        };
        let socket = UdpSocket::bind(bind_addr)
            .map_err(|e| LogError::io(format!("{}:{}", host, port), e))?;

        Ok(Self {
            id: id.to_string(),
            socket,
            peer: SocketAddr::new(ip, port),
            formatter,
            config,
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Render and send one message. Oversize messages send nothing and
    /// report back; per-frame send failures do not stop later frames.
    pub fn write(&self, severity: Severity, args: &[LogValue]) -> Result<()> {
        let rendered = self.formatter.format(&self.id, severity, args);
        let frames = fragment::split(rendered.as_bytes(), self.config.max_fragments())?;

        let mut first_error = None;
        for frame in &frames {
            if let Err(e) = self.socket.send_to(frame, self.peer) {
                first_error.get_or_insert(LogError::io(self.peer.to_string(), e));
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuntimeConfig;
    use crate::format::SyslogFormat;
    use crate::transport::fragment::{FrameHeader, CHUNK_CAPACITY, HEADER_LEN};
    use std::time::Duration;

    fn receiver() -> (UdpSocket, u16) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    fn transport(port: u16, config: SharedConfig) -> DatagramTransport {
        let locator = Locator::parse(&format!("udp://127.0.0.1:{}", port)).unwrap();
        let formatter = Box::new(SyslogFormat::new(&locator, config.clone()).unwrap());
        DatagramTransport::new("svc", &locator, formatter, config).unwrap()
    }

    #[test]
    fn test_single_frame_round_trip() {
        let (rx, port) = receiver();
        let t = transport(port, RuntimeConfig::new());
        t.write(Severity::Notice, &["ping".into()]).unwrap();

        let mut buf = [0u8; 0x2000];
        let n = rx.recv(&mut buf).unwrap();
        let header = FrameHeader::parse(&buf[..n]).unwrap();
        assert_eq!(header.total, 1);
        assert_eq!(header.seq, 0);
        let body = std::str::from_utf8(&buf[HEADER_LEN..n]).unwrap();
        assert!(body.contains("ping"));
    }

    #[test]
    fn test_host_must_be_ip_literal() {
        let locator = Locator::parse("udp://graylog.local:514").unwrap();
        let config = RuntimeConfig::new();
        let formatter = Box::new(SyslogFormat::new(&locator, config.clone()).unwrap());
        let result = DatagramTransport::new("svc", &locator, formatter, config);
        assert!(matches!(result, Err(LogError::InvalidHost { .. })));
    }

    #[test]
    fn test_port_required() {
        let locator = Locator::parse("udp://127.0.0.1").unwrap();
        let config = RuntimeConfig::new();
        let formatter = Box::new(SyslogFormat::new(&locator, config.clone()).unwrap());
        assert!(DatagramTransport::new("svc", &locator, formatter, config).is_err());
    }

    #[test]
    fn test_ipv6_peer() {
        let locator = Locator::parse("udp://[::1]:9514").unwrap();
        let config = RuntimeConfig::new();
        let formatter = Box::new(SyslogFormat::new(&locator, config.clone()).unwrap());
        let t = DatagramTransport::new("svc", &locator, formatter, config).unwrap();
        assert!(t.peer().is_ipv6());
    }

    #[test]
    fn test_oversize_sends_nothing() {
        let (rx, port) = receiver();
        let config = RuntimeConfig::new();
        let t = transport(port, config);

        let big = "x".repeat(0x2000 * 2);
        let result = t.write(Severity::Notice, &[big.into()]);
        assert!(matches!(result, Err(LogError::Oversize { .. })));

        rx.set_read_timeout(Some(Duration::from_millis(200))).unwrap();
        let mut buf = [0u8; 0x2000];
        assert!(rx.recv(&mut buf).is_err(), "no packet should arrive");
    }

    #[test]
    fn test_fragmented_send() {
        let (rx, port) = receiver();
        let config = RuntimeConfig::new();
        config.set_max_fragments(4);
        let t = transport(port, config);

        // large enough for exactly 3 fragments after the syslog prefix
        let big = "y".repeat(CHUNK_CAPACITY * 2 + 100);
        t.write(Severity::Notice, &[big.into()]).unwrap();

        let mut buf = [0u8; 0x2000];
        let mut headers = Vec::new();
        for _ in 0..3 {
            let n = rx.recv(&mut buf).unwrap();
            headers.push(FrameHeader::parse(&buf[..n]).unwrap());
        }
        assert!(headers.iter().all(|h| h.total == 3));
        assert!(headers.iter().all(|h| h.correlation == headers[0].correlation));
        let mut seqs: Vec<u8> = headers.iter().map(|h| h.seq).collect();
        seqs.sort_unstable();
        assert_eq!(seqs, vec![0, 1, 2]);
    }
}
