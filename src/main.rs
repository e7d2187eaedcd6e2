// EsoxSolutions.ResourcePool - Rust Port
// Bounded, thread-safe pool for closeable resources

// This is just a binary wrapper - the actual library is in lib.rs
// Run examples with: cargo run --example basic

use esox_resourcepool::{PoolConfiguration, Resource, ResourcePool};
use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};

struct Session(u32);

impl Resource for Session {
    type Error = Infallible;

    fn close(self) -> Result<(), Infallible> {
        println!("  Closing session {}", self.0);
        Ok(())
    }
}

fn main() {
    println!("=== EsoxSolutions.ResourcePool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let next_id = AtomicU32::new(1);
    let config = PoolConfiguration::new(move || {
        Ok::<_, Infallible>(Session(next_id.fetch_add(1, Ordering::Relaxed)))
    })
    .with_initial_capacity(1)
    .with_max_capacity(2);

    let pool = match ResourcePool::new(config) {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("  Failed to build pool: {}", err);
            return;
        }
    };

    if let Ok(session) = pool.checkout() {
        println!("  Got session: {}", session.0);
    }

    println!("  Idle after return: {}", pool.len());
    pool.close();
}
