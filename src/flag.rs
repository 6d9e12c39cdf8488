use crate::error::Error;

/// Parse a command-line yes/no token.
///
/// Accepts exactly `Y`, `y`, `yes` for `true` and `N`, `n`, `no` for
/// `false`. Any other token, including `YES` or an empty string, is an
/// [`Error::InvalidFlag`].
///
/// ```rust
/// use gtiff_metadata::flag::parse_yes_no;
///
/// assert!(parse_yes_no("y").unwrap());
/// assert!(!parse_yes_no("no").unwrap());
/// assert!(parse_yes_no("1").is_err());
/// ```
pub fn parse_yes_no(token: &str) -> Result<bool, Error> {
    match token {
        "Y" | "y" | "yes" => Ok(true),
        "N" | "n" | "no" => Ok(false),
        other => Err(Error::InvalidFlag(other.to_string())),
    }
}
