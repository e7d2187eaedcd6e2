//! Basic usage examples for ResourcePool

use esox_resourcepool::{PoolConfiguration, PoolError, Resource, ResourcePool};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct Connection {
    id: u32,
}

impl Resource for Connection {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        println!("   [close] connection {}", self.id);
        Ok(())
    }
}

fn counter_factory() -> impl Fn() -> io::Result<Connection> + Send + Sync + 'static {
    let next_id = Arc::new(AtomicU32::new(1));
    move || {
        Ok(Connection {
            id: next_id.fetch_add(1, Ordering::Relaxed),
        })
    }
}

fn main() {
    println!("=== EsoxSolutions.ResourcePool - Basic Examples ===\n");

    // Example 1: Acquire and release
    acquire_release();

    // Example 2: Capacity and overflow
    overflow();

    // Example 3: Idle timeout
    idle_timeout();

    // Example 4: Guards and shutdown
    guards_and_close();
}

fn acquire_release() {
    println!("1. Acquire and Release:");
    let pool = ResourcePool::with_factory(counter_factory()).unwrap();

    let conn = pool.acquire().unwrap();
    println!("   Got connection: {}", conn.id);
    pool.release(conn);

    let conn = pool.acquire().unwrap();
    println!("   Reused connection: {}", conn.id);
    pool.release(conn);

    println!("   Idle after return: {}\n", pool.len());
}

fn overflow() {
    println!("2. Capacity and Overflow:");

    let config = PoolConfiguration::new(counter_factory())
        .with_initial_capacity(2)
        .with_max_capacity(2);
    let pool = ResourcePool::new(config).unwrap();
    println!("   Pre-warmed: {}", pool.len());

    pool.release(Connection { id: 99 });
    println!("   Idle after overflow: {}\n", pool.len());
}

fn idle_timeout() {
    println!("3. Idle Timeout:");

    let config = PoolConfiguration::new(counter_factory())
        .with_initial_capacity(1)
        .with_idle_timeout(Duration::from_millis(50));
    let pool = ResourcePool::new(config).unwrap();

    thread::sleep(Duration::from_millis(100));
    let conn = pool.acquire().unwrap();
    println!("   Stale connection replaced by: {}\n", conn.id);
    pool.release(conn);
}

fn guards_and_close() {
    println!("4. Guards and Shutdown:");
    let pool = ResourcePool::with_factory(counter_factory()).unwrap();

    {
        let conn = pool.checkout().unwrap();
        println!("   Checked out: {}", conn.id);
        // Returned when dropped
    }
    println!("   Idle: {}", pool.len());

    pool.close();
    match pool.acquire() {
        Err(PoolError::Closed) => println!("   Acquire after close: pool closed"),
        other => println!("   Unexpected: {:?}", other),
    }
}
