//! Sharing one pool across tokio tasks

use esox_resourcepool::{PoolConfiguration, Resource, ResourcePool};
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Wraps a TCP stream so the demo can report closes
struct Upstream(TcpStream);

impl Resource for Upstream {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        println!("   [close] {:?}", self.0.local_addr());
        self.0.close()
    }
}

fn spawn_echo_server() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?.to_string();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let mut stream = stream;
                let mut buf = [0u8; 64];
                while let Ok(n) = stream.read(&mut buf) {
                    if n == 0 || stream.write_all(&buf[..n]).is_err() {
                        break;
                    }
                }
            });
        }
    });

    Ok(addr)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== EsoxSolutions.ResourcePool - Concurrent Example ===\n");

    let addr = spawn_echo_server()?;
    let config = PoolConfiguration::new(move || TcpStream::connect(&addr).map(Upstream))
        .with_initial_capacity(2)
        .with_max_capacity(4)
        .with_idle_timeout(Duration::from_secs(30));
    let pool = ResourcePool::new(config)?;

    let mut handles = vec![];
    for i in 0..8u8 {
        let pool = pool.clone();
        handles.push(tokio::task::spawn_blocking(move || -> io::Result<u8> {
            let mut conn = pool
                .checkout()
                .map_err(io::Error::other)?;
            conn.0.write_all(&[i])?;
            let mut reply = [0u8; 1];
            conn.0.read_exact(&mut reply)?;
            Ok(reply[0])
        }));
    }

    for handle in handles {
        let echoed = handle.await??;
        println!("   Echoed: {}", echoed);
    }

    println!("\n   Idle connections: {} (max {})", pool.len(), pool.max_capacity());
    pool.close();
    println!("   Closed: {}", pool.is_closed());

    Ok(())
}
