//! CPF helpers.
//!
//! A CPF is the 11-digit Brazilian taxpayer id used as the natural key for
//! clients. It is treated as an opaque string everywhere except here.

/// Number of characters in a well-formed CPF.
pub const CPF_LEN: usize = 11;

/// Replaces the leading characters of a CPF when it is written to logs.
pub const MASK_TOKEN: &str = "***";

const MASKED_PREFIX: usize = 3;

/// Mask a CPF for logging: the first three characters become [`MASK_TOKEN`]
/// and the last eight are kept.
///
/// Inputs that are not exactly [`CPF_LEN`] characters long are returned
/// unchanged. That passthrough is intentional; callers never validate CPFs.
pub fn mask_cpf(cpf: &str) -> String {
  if cpf.chars().count() != CPF_LEN {
    return cpf.to_owned();
  }
  let visible: String = cpf.chars().skip(MASKED_PREFIX).collect();
  format!("{MASK_TOKEN}{visible}")
}
