use bellman::gadgets::num::AllocatedNum;
use bellman::{ConstraintSystem, SynthesisError};

use super::{MimcPermutation, MiyaguchiPreneel};
use crate::Fr;

/// One permutation round: with `t = x + k + C`, allocates the addition chain
/// a = t^2, b = t^4, c = t^6 and the result d = t^7 (plus k when
/// `add_key_to_result` is set), emitting exactly four bilinear constraints.
///
/// `t` itself is a linear combination of x, k and the constant, never an
/// allocated variable. Witness closures fail with `AssignmentMissing` when an
/// input has no value; during parameter generation they are never invoked and
/// only the constraint structure is emitted.
pub fn mimc_round<CS: ConstraintSystem<Fr>>(
    cs: &mut CS,
    x: &AllocatedNum<Fr>,
    k: &AllocatedNum<Fr>,
    rc: Fr,
    add_key_to_result: bool,
) -> Result<AllocatedNum<Fr>, SynthesisError> {
    let t = match (x.get_value(), k.get_value()) {
        (Some(x), Some(k)) => Some(x + k + rc),
        _ => None,
    };

    let a = AllocatedNum::alloc(cs.namespace(|| "a"), || {
        t.map(|t| t.square())
            .ok_or(SynthesisError::AssignmentMissing)
    })?;
    cs.enforce(
        || "a = t * t",
        |lc| lc + x.get_variable() + k.get_variable() + (rc, CS::one()),
        |lc| lc + x.get_variable() + k.get_variable() + (rc, CS::one()),
        |lc| lc + a.get_variable(),
    );

    let b = a.square(cs.namespace(|| "b"))?; // t^4
    let c = a.mul(cs.namespace(|| "c"), &b)?; // t^6

    let d = AllocatedNum::alloc(cs.namespace(|| "d"), || {
        let t = t.ok_or(SynthesisError::AssignmentMissing)?;
        let c = c.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        let mut d = c * t;
        if add_key_to_result {
            d += k.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        }
        Ok(d)
    })?;
    if add_key_to_result {
        cs.enforce(
            || "d - k = t * c",
            |lc| lc + x.get_variable() + k.get_variable() + (rc, CS::one()),
            |lc| lc + c.get_variable(),
            |lc| lc + d.get_variable() - k.get_variable(),
        );
    } else {
        cs.enforce(
            || "d = t * c",
            |lc| lc + x.get_variable() + k.get_variable() + (rc, CS::one()),
            |lc| lc + c.get_variable(),
            |lc| lc + d.get_variable(),
        );
    }

    Ok(d)
}

impl MimcPermutation {
    /// Chains the rounds in table order, each round's input being the
    /// previous round's result, the key re-injected only in the last round.
    pub fn synthesize<CS: ConstraintSystem<Fr>>(
        &self,
        cs: &mut CS,
        x: &AllocatedNum<Fr>,
        k: &AllocatedNum<Fr>,
    ) -> Result<AllocatedNum<Fr>, SynthesisError> {
        let rounds = self.round_constants.len();
        let mut state = x.clone();
        for (i, rc) in self.round_constants.iter().enumerate() {
            state = mimc_round(
                &mut cs.namespace(|| format!("round {}", i)),
                &state,
                k,
                *rc,
                i + 1 == rounds,
            )?;
        }
        Ok(state)
    }
}

impl MiyaguchiPreneel {
    /// Synthesizes the hash chain in strict block order: block i is encrypted
    /// under the previous chaining value (the IV for block 0) and
    /// `(key + cipher + m_i) * 1 = h_i` ties the feed-forward together.
    pub fn synthesize<CS: ConstraintSystem<Fr>>(
        &self,
        cs: &mut CS,
        iv: &AllocatedNum<Fr>,
        blocks: &[AllocatedNum<Fr>],
    ) -> Result<AllocatedNum<Fr>, SynthesisError> {
        if blocks.is_empty() {
            // The chain defines no digest for zero blocks.
            return Err(SynthesisError::Unsatisfiable);
        }
        let mut key = iv.clone();
        for (i, m) in blocks.iter().enumerate() {
            let cs = &mut cs.namespace(|| format!("block {}", i));
            let cipher = self
                .cipher
                .synthesize(&mut cs.namespace(|| "cipher"), m, &key)?;
            let out = AllocatedNum::alloc(cs.namespace(|| "out"), || {
                let key = key.get_value().ok_or(SynthesisError::AssignmentMissing)?;
                let cipher = cipher
                    .get_value()
                    .ok_or(SynthesisError::AssignmentMissing)?;
                let m = m.get_value().ok_or(SynthesisError::AssignmentMissing)?;
                Ok(key + cipher + m)
            })?;
            cs.enforce(
                || "out = key + cipher + m",
                |lc| lc + key.get_variable() + cipher.get_variable() + m.get_variable(),
                |lc| lc + CS::one(),
                |lc| lc + out.get_variable(),
            );
            key = out;
        }
        Ok(key)
    }
}
