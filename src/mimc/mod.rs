pub mod constants;
pub mod gadget;

use self::constants::ROUND_CONSTANTS;
use crate::error::MimcError;
use crate::Fr;

/// The MiMC-e7 keyed permutation: a fixed number of rounds sharing one key,
/// each round computing `(x + k + C[i])^7`, with the key re-injected into the
/// result of the last round only.
///
/// Topology (round count and constants) is fixed at construction.
#[derive(Debug, Clone)]
pub struct MimcPermutation {
    round_constants: Vec<Fr>,
}

impl MimcPermutation {
    /// Fails if fewer constants than rounds are supplied; constants are never
    /// truncated into a shorter permutation or reused across rounds. Surplus
    /// entries beyond `rounds` are cut here so the stored topology is exact.
    pub fn new(rounds: usize, mut round_constants: Vec<Fr>) -> Result<Self, MimcError> {
        if round_constants.len() < rounds {
            return Err(MimcError::InsufficientConstants {
                rounds,
                available: round_constants.len(),
            });
        }
        round_constants.truncate(rounds);
        Ok(Self { round_constants })
    }

    pub fn rounds(&self) -> usize {
        self.round_constants.len()
    }

    pub fn round_constants(&self) -> &[Fr] {
        &self.round_constants
    }

    /// Plain field evaluation, mirroring the addition chain of the circuit
    /// rounds (t, t^2, t^4, t^6, t^7).
    pub fn permute(&self, x: Fr, k: Fr) -> Fr {
        let mut state = x;
        for rc in self.round_constants.iter() {
            let t = state + k + rc;
            let a = t.square();
            let b = a.square();
            let c = a * b;
            state = c * t;
        }
        state + k
    }
}

impl Default for MimcPermutation {
    fn default() -> Self {
        Self {
            round_constants: ROUND_CONSTANTS.clone(),
        }
    }
}

/// Miyaguchi-Preneel chaining over [`MimcPermutation`]: block i is encrypted
/// under the previous chaining value (the IV for block 0), and the key,
/// ciphertext and message are all fed forward into the next chaining value.
#[derive(Debug, Clone, Default)]
pub struct MiyaguchiPreneel {
    cipher: MimcPermutation,
}

impl MiyaguchiPreneel {
    pub fn new(cipher: MimcPermutation) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &MimcPermutation {
        &self.cipher
    }

    /// Plain field evaluation of the hash chain. An empty message is
    /// rejected: the construction defines no digest for zero blocks.
    pub fn hash(&self, iv: Fr, blocks: &[Fr]) -> Result<Fr, MimcError> {
        if blocks.is_empty() {
            return Err(MimcError::EmptyMessage);
        }
        let mut key = iv;
        for m in blocks.iter() {
            key = key + self.cipher.permute(*m, key) + m;
        }
        Ok(key)
    }
}

/// Encrypts `x` under `k` with the default 91-round permutation.
pub fn mimc_encrypt(x: Fr, k: Fr) -> Fr {
    MimcPermutation::default().permute(x, k)
}

/// Hashes `blocks` under `iv` with the default 91-round permutation.
pub fn mimc_hash(iv: Fr, blocks: &[Fr]) -> Result<Fr, MimcError> {
    MiyaguchiPreneel::default().hash(iv, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIMC_ROUNDS;
    use ff::PrimeField;

    fn fr(decimal: &str) -> Fr {
        Fr::from_str_vartime(decimal).unwrap()
    }

    #[test]
    fn insufficient_constants_are_rejected_at_construction() {
        let short = ROUND_CONSTANTS[..MIMC_ROUNDS - 1].to_vec();
        assert_eq!(
            MimcPermutation::new(MIMC_ROUNDS, short).unwrap_err(),
            MimcError::InsufficientConstants {
                rounds: MIMC_ROUNDS,
                available: MIMC_ROUNDS - 1,
            }
        );
    }

    #[test]
    fn surplus_constants_are_cut_to_the_requested_rounds() {
        let perm = MimcPermutation::new(7, ROUND_CONSTANTS.clone()).unwrap();
        assert_eq!(perm.rounds(), 7);
        assert_eq!(perm.round_constants(), &ROUND_CONSTANTS[..7]);
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_eq!(
            mimc_hash(Fr::zero(), &[]).unwrap_err(),
            MimcError::EmptyMessage
        );
    }

    #[test]
    fn hash_is_sensitive_to_a_single_block() {
        let zero = Fr::zero();
        let one = Fr::one();
        let h0 = mimc_hash(zero, &[zero, zero]).unwrap();
        let h1 = mimc_hash(zero, &[zero, one]).unwrap();
        assert_ne!(h0, h1);
    }

    #[test]
    fn zero_leaf_fixture() {
        // IV = 0 over two zero blocks, the all-zero Merkle leaf digest.
        let zero = Fr::zero();
        assert_eq!(
            mimc_hash(zero, &[zero, zero]).unwrap(),
            fr("12051037220118970621966369292236578438899811544420145204511585201863702108997")
        );
    }

    #[test]
    fn merkle_fixture_levels() {
        let expected = [
            "29561944909421929258337451596166960196632773510545153885677880503769602869481",
            "8973508515018069845441396360338187899812600057575909676754200255381704496117",
            "9506848426714260534262484976705145291455522447005483988580642490879477722659",
        ];
        let zero = Fr::zero();
        let mut node = mimc_hash(zero, &[zero, zero]).unwrap();
        for digest in expected.iter() {
            node = mimc_hash(zero, &[node, node]).unwrap();
            assert_eq!(node, fr(digest));
        }
    }
}
