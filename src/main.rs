// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example xor
fn main() {
    println!("ferrite-synapse: a neuron/connection graph network with online backpropagation.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
