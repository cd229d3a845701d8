//! Integer-to-words conversion on the Indian numbering scale
//!
//! Spoken amounts use thousand (10^3), lakh (10^5), and crore (10^7)
//! groupings rather than the Western million/billion scale. No connective
//! words ("and") are ever inserted.

const UNITS: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Convert a non-negative integer to English words.
///
/// Total over all of `u64`; the output never contains double spaces or
/// leading/trailing whitespace.
pub fn to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    // Collapse whitespace runs and trim. The recursion only ever joins with
    // single spaces, but normalizing here keeps the guarantee local.
    spell(n).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn spell(n: u64) -> String {
    match n {
        0..=19 => UNITS[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            if n % 10 == 0 {
                tens.to_string()
            } else {
                format!("{tens} {}", UNITS[(n % 10) as usize])
            }
        }
        100..=999 => grouped(n, 100, "hundred"),
        1_000..=99_999 => grouped(n, 1_000, "thousand"),
        100_000..=9_999_999 => grouped(n, 100_000, "lakh"),
        _ => grouped(n, 10_000_000, "crore"),
    }
}

fn grouped(n: u64, scale: u64, scale_name: &str) -> String {
    let mut out = format!("{} {scale_name}", spell(n / scale));
    if n % scale != 0 {
        out.push(' ');
        out.push_str(&spell(n % scale));
    }
    out
}
