//! Sykli CI pipeline for the time service
//!
//! Run locally: sykli run
//! Or: cargo run --bin sykli --features sykli -- --emit | sykli run -

use sykli::Pipeline;

fn main() {
    let mut p = Pipeline::new();

    // === RESOURCES ===
    let src = p.dir(".");
    let cargo_registry = p.cache("cargo-registry");
    let cargo_git = p.cache("cargo-git");
    let target_cache = p.cache("target");

    // === TEMPLATE ===
    let rust = sykli::Template::new()
        .container("rust:1.85")
        .mount_dir(&src, "/src")
        .mount_cache(&cargo_registry, "/usr/local/cargo/registry")
        .mount_cache(&cargo_git, "/usr/local/cargo/git")
        .mount_cache(&target_cache, "/src/target")
        .workdir("/src");

    // === TASKS ===

    // Test - unit tests plus loopback HTTP tests
    let _ = p
        .task("test")
        .from(&rust)
        .run("cargo test --all-features")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    // Lint - run clippy with strict warnings
    let _ = p
        .task("lint")
        .from(&rust)
        .run("cargo clippy --all-targets --all-features -- -D warnings")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    // Format check - verify code formatting
    let _ = p
        .task("fmt")
        .from(&rust)
        .run("cargo fmt -- --check")
        .inputs(&["**/*.rs"]);

    // Build release binary (depends on test, lint, fmt)
    let _ = p
        .task("build")
        .from(&rust)
        .run("cargo build --release --bin time-service")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"])
        .output("binary", "target/release/time-service")
        .after(&["test", "lint", "fmt"]);

    // Smoke test - start the binary and hit every endpoint
    let _ = p
        .task("smoke-test")
        .from(&rust)
        .run(
            r#"#!/bin/bash
set -e

PORT=18000 SHUTDOWN_DRAIN_SECONDS=2 ./target/release/time-service &
PID=$!
sleep 1

curl -fsS http://127.0.0.1:18000/health | grep -q '"healthy"'
curl -fsS http://127.0.0.1:18000/ready | grep -q '"ready"'
curl -fsS -H 'X-Forwarded-For: 203.0.113.5, 10.0.0.1' http://127.0.0.1:18000/ \
  | grep -q '"ip":"203.0.113.5"'

kill -TERM $PID
sleep 0.5
STATUS=$(curl -s -o /dev/null -w '%{http_code}' http://127.0.0.1:18000/ready)
if [ "$STATUS" != "503" ]; then
  echo "ERROR: /ready should return 503 while draining, got $STATUS"
  exit 1
fi

wait $PID
echo "Smoke test passed"
"#,
        )
        .input_from("build", "binary", "/src/target/release/time-service")
        .after(&["build"]);

    p.emit();
}
