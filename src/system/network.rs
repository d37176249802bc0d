use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs, UdpSocket};

/// Address of the interface the OS would route `probe` through.
///
/// Connecting a UDP socket sends nothing on the wire; it only makes the
/// kernel pick a route and bind the local end. The socket is dropped on
/// every return path.
pub fn local_address(probe: &str) -> io::Result<IpAddr> {
    let target = resolve(probe)?;
    let bind_addr: SocketAddr = if target.is_ipv4() {
        ([0, 0, 0, 0], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(bind_addr)?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}

fn resolve(probe: &str) -> io::Result<SocketAddr> {
    probe.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("route probe {probe} resolved to no address"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_probe_resolves_to_loopback() {
        let ip = local_address("127.0.0.1:9").unwrap();
        assert!(ip.is_loopback());
    }

    #[test]
    fn malformed_probe_is_an_error() {
        assert!(local_address("not an endpoint").is_err());
    }
}
