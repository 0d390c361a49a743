//! Recovery code generation.

use rand::Rng;

use crate::domain::entities::recovery_code::{CODE_ALPHABET, CODE_LENGTH};

/// Produces recovery code values
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniformly random codes over the recovery alphabet
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::recovery_code::RecoveryCode;

    #[test]
    fn test_generated_codes_are_well_formed() {
        let generator = RandomCodeGenerator;
        for _ in 0..200 {
            let code = generator.generate();
            assert!(RecoveryCode::is_well_formed(&code), "bad code {}", code);
        }
    }
}
