use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

/// Formats with a thousands separator: `1234567` -> `1,234,567`.
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed two-decimal rendering of the double's exact decimal value, with
/// halves rounded up in magnitude.
///
/// Rounding looks at the exact binary value, so `0.075` (stored as
/// `0.07499...`) renders as `0.07` while the exact tie `0.125` renders as
/// `0.13`.
pub fn fixed2(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let exact = format!("{:.*}", exact_fraction_digits(magnitude), magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut frac = frac_part.bytes().take(3).collect::<Vec<u8>>();
    frac.resize(3, b'0');
    let round_up = frac[2] >= b'5';

    let mut digits: Vec<u8> = int_part.bytes().chain(frac[..2].iter().copied()).collect();
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let int_digits = String::from_utf8_lossy(&digits[..split]);
    let frac_digits = String::from_utf8_lossy(&digits[split..]);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, int_digits, frac_digits)
}

/// Number of fractional digits needed to print `value` without rounding.
fn exact_fraction_digits(value: f64) -> usize {
    let biased = ((value.to_bits() >> 52) & 0x7ff) as i32;
    let exponent = if biased == 0 { -1074 } else { biased - 1075 };
    std::cmp::max(3, -exponent) as usize
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be greater than 0");
    }

    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be greater than 0");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(fixed2(66.666666), "66.67");
        assert_eq!(fixed2(2.0 / 3.0 * 100.0), "66.67");
        assert_eq!(fixed2(50.0), "50.00");
        assert_eq!(fixed2(0.0), "0.00");
    }

    #[test]
    fn test_fixed2_uses_exact_binary_value() {
        // 3/40 is stored just below 0.075
        assert_eq!(fixed2(3.0 / 40.0), "0.07");
        assert_eq!(fixed2(1.005), "1.00");
        assert_eq!(fixed2(0.125), "0.13");
        assert_eq!(fixed2(0.375), "0.38");
    }

    #[test]
    fn test_fixed2_carry_and_sign() {
        assert_eq!(fixed2(0.999), "1.00");
        assert_eq!(fixed2(99.999), "100.00");
        assert_eq!(fixed2(-0.125), "-0.13");
        assert_eq!(fixed2(-0.0), "0.00");
        assert_eq!(fixed2(1e-300), "0.00");
    }
}
