use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers close roughly every five seconds.
pub const LEDGERS_PER_DAY: u32 = 17_280;

pub const TTL_THRESHOLD: u32 = 60 * LEDGERS_PER_DAY; // ~60 days
pub const TTL_EXTEND_TO: u32 = 120 * LEDGERS_PER_DAY; // ~120 days

/// Keeps a persistent entry alive for another `TTL_EXTEND_TO` ledgers once its
/// remaining lifetime drops under `TTL_THRESHOLD`.
///
/// The entry must exist; call this right after writing or reading it.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Same as [`extend_persistent`] for the contract instance (config, counters).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
