use bellman::gadgets::num::AllocatedNum;
use bellman::gadgets::test::TestConstraintSystem;
use bellman::ConstraintSystem;
use ff::Field;
use log::info;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use structopt::StructOpt;

use mimc7::mimc::constants::derive_constants;
use mimc7::mimc::{mimc_hash, MiyaguchiPreneel};
use mimc7::Fr;

#[derive(StructOpt)]
#[structopt(name = "mimc7", about = "MiMC hash test-vector and fixture generator")]
enum Opt {
    /// Print a random (iv, m0, m1, hash) conformance vector
    Vector,
    /// Print the all-zero-leaf Merkle fixture digests, level by level
    Merkle {
        #[structopt(long, default_value = "3")]
        depth: usize,
    },
    /// Regenerate the round-constant table from a textual seed
    Constants {
        #[structopt(long, default_value = "mimc")]
        seed: String,
        #[structopt(long, default_value = "91")]
        rounds: usize,
    },
}

fn decimal(value: &Fr) -> String {
    BigUint::from_bytes_le(&value.to_bytes()).to_string()
}

fn generate_test_vector() {
    let iv = Fr::random(&mut OsRng);
    let m0 = Fr::random(&mut OsRng);
    let m1 = Fr::random(&mut OsRng);

    // Run the actual hash gadget so the vector certifies the circuit, not
    // just the native evaluation.
    let mut cs = TestConstraintSystem::<Fr>::new();
    let iv_var = AllocatedNum::alloc(cs.namespace(|| "iv"), || Ok(iv)).unwrap();
    let blocks = vec![
        AllocatedNum::alloc(cs.namespace(|| "m0"), || Ok(m0)).unwrap(),
        AllocatedNum::alloc(cs.namespace(|| "m1"), || Ok(m1)).unwrap(),
    ];
    let out = MiyaguchiPreneel::default()
        .synthesize(&mut cs.namespace(|| "hash"), &iv_var, &blocks)
        .unwrap();
    assert!(cs.is_satisfied());
    info!("synthesized {} constraints", cs.num_constraints());

    println!("iv = {}", decimal(&iv));
    println!("m0 = {}", decimal(&m0));
    println!("m1 = {}", decimal(&m1));
    println!("out = {}", decimal(&out.get_value().unwrap()));
}

fn generate_merkle_fixture(depth: usize) {
    let zero = Fr::zero();
    let mut node = zero;
    for level in 0..depth {
        let digest = mimc_hash(zero, &[node, node]).unwrap();
        println!("level {}: H({}, {}) = {}", level, decimal(&node), decimal(&node), decimal(&digest));
        node = digest;
    }
}

fn main() {
    env_logger::init();
    match Opt::from_args() {
        Opt::Vector => generate_test_vector(),
        Opt::Merkle { depth } => generate_merkle_fixture(depth),
        Opt::Constants { seed, rounds } => {
            for constant in derive_constants(&seed, rounds).iter() {
                println!("{}", decimal(constant));
            }
        }
    }
}
