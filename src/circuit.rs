use bellman::gadgets::num::AllocatedNum;
use bellman::{Circuit, ConstraintSystem, SynthesisError};

use crate::mimc::MiyaguchiPreneel;
use crate::Fr;

/// Proves knowledge of an IV and message blocks hashing to a public digest.
///
/// The block count fixes the circuit shape; values stay `None` for parameter
/// generation and are filled for proving.
#[derive(Debug, Clone, Default)]
pub struct MimcHashCircuit {
    pub iv: Option<Fr>,
    pub blocks: Vec<Option<Fr>>,
}

impl MimcHashCircuit {
    pub fn empty(num_blocks: usize) -> Self {
        Self {
            iv: None,
            blocks: vec![None; num_blocks],
        }
    }

    pub fn filled(iv: Fr, blocks: &[Fr]) -> Self {
        Self {
            iv: Some(iv),
            blocks: blocks.iter().cloned().map(Some).collect(),
        }
    }
}

impl Circuit<Fr> for MimcHashCircuit {
    fn synthesize<CS: ConstraintSystem<Fr>>(self, cs: &mut CS) -> Result<(), SynthesisError> {
        let iv = AllocatedNum::alloc(cs.namespace(|| "iv"), || {
            self.iv.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for (i, block) in self.blocks.iter().enumerate() {
            let block = *block;
            blocks.push(AllocatedNum::alloc(
                cs.namespace(|| format!("block {}", i)),
                || block.ok_or(SynthesisError::AssignmentMissing),
            )?);
        }

        let out = MiyaguchiPreneel::default().synthesize(&mut cs.namespace(|| "hash"), &iv, &blocks)?;

        // Resulting digest is the only public input
        out.inputize(&mut *cs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mimc::mimc_hash;
    use bellman::groth16;
    use bls12_381::Bls12;
    use ff::Field;
    use rand::rngs::OsRng;

    #[test]
    fn parameter_generation_needs_no_assignments() {
        let params =
            groth16::generate_random_parameters::<Bls12, _, _>(MimcHashCircuit::empty(2), &mut OsRng)
                .unwrap();

        // Proving without assigned inputs must fail instead of propagating
        // stale values through the chain.
        let err = groth16::create_random_proof(MimcHashCircuit::empty(2), &params, &mut OsRng)
            .unwrap_err();
        assert!(matches!(err, SynthesisError::AssignmentMissing));
    }

    #[test]
    fn groth16_round_trip() {
        let iv = Fr::random(&mut OsRng);
        let blocks = [Fr::random(&mut OsRng), Fr::random(&mut OsRng)];

        let params =
            groth16::generate_random_parameters::<Bls12, _, _>(MimcHashCircuit::empty(2), &mut OsRng)
                .unwrap();
        let pvk = groth16::prepare_verifying_key(&params.vk);

        let proof =
            groth16::create_random_proof(MimcHashCircuit::filled(iv, &blocks), &params, &mut OsRng)
                .unwrap();

        let digest = mimc_hash(iv, &blocks).unwrap();
        assert!(groth16::verify_proof(&pvk, &proof, &[digest]).is_ok());
        assert!(groth16::verify_proof(&pvk, &proof, &[digest + Fr::one()]).is_err());
    }
}
