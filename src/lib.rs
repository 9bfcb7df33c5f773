//! # Conserje
//!
//! `conserje` is the reservation-desk backend for a hotel group. It exposes a
//! small REST API to authenticate employees and to create or list hotels,
//! rooms, clients, calendar dates, booking channels, payment methods, and
//! reservations, all backed by a PostgreSQL star schema.
//!
//! Every endpoint is a single pass: parse the payload, run one query or
//! insert against the pool, serialize the result. There is no session store
//! and no background work; the database's constraints are the source of
//! truth for uniqueness and referential integrity.

pub mod cli;
pub mod conserje;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
