/// Unit labels used when formatting byte sizes.
///
/// Labels are ordered bytes, kilobytes, megabytes, gigabytes. Scaling always
/// uses base-1024 division regardless of the label text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeUnits {
    /// Labels for B, KB, MB and GB.
    pub labels: [String; 4],
}

impl SizeUnits {
    /// English labels: `B`, `KB`, `MB`, `GB`.
    pub fn english() -> Self {
        Self::new(["B", "KB", "MB", "GB"])
    }

    /// Russian labels: `Б`, `КБ`, `МБ`, `ГБ`.
    pub fn russian() -> Self {
        Self::new(["Б", "КБ", "МБ", "ГБ"])
    }

    /// Custom labels, smallest unit first.
    pub fn new(labels: [&str; 4]) -> Self {
        Self {
            labels: labels.map(str::to_owned),
        }
    }
}

impl Default for SizeUnits {
    fn default() -> Self {
        Self::english()
    }
}

/// Format a byte count for display next to a file name.
///
/// Below 1024 the count is shown as-is; otherwise it is scaled through KB/MB/GB
/// with one decimal place. Anything past the gigabyte range stays in GB.
pub fn format_size(bytes: u64, units: &SizeUnits) -> String {
    const K: f64 = 1024.0;

    if bytes < 1024 {
        return format!("{} {}", bytes, units.labels[0]);
    }

    let mut value = bytes as f64;
    let mut idx = 0;
    while value >= K && idx < units.labels.len() - 1 {
        value /= K;
        idx += 1;
    }
    format!("{:.1} {}", value, units.labels[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_one_kib_are_unscaled() {
        let u = SizeUnits::english();
        assert_eq!(format_size(0, &u), "0 B");
        assert_eq!(format_size(1, &u), "1 B");
        assert_eq!(format_size(1023, &u), "1023 B");
    }

    #[test]
    fn scales_with_one_decimal() {
        let u = SizeUnits::english();
        assert_eq!(format_size(1024, &u), "1.0 KB");
        assert_eq!(format_size(1536, &u), "1.5 KB");
        assert_eq!(format_size(1_048_576, &u), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024, &u), "5.0 GB");
    }

    #[test]
    fn huge_values_stay_in_gigabytes() {
        let u = SizeUnits::english();
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024, &u), "2048.0 GB");
    }

    #[test]
    fn localized_labels() {
        let u = SizeUnits::russian();
        assert_eq!(format_size(0, &u), "0 Б");
        assert_eq!(format_size(1536, &u), "1.5 КБ");
    }
}
