use proptest::prelude::*;
use resviz::format::{bytes_to_human, kibibytes_to_human};
use resviz::graph::{percent_bar, ratio_bar};
use resviz::report::disk::{DiskReportOptions, render_report};
use resviz::system::du::DirectoryUsage;

fn count(bar: &str, mark: char) -> usize {
    bar.chars().filter(|&c| c == mark).count()
}

fn make_entries(sizes: &[u64]) -> Vec<DirectoryUsage> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| DirectoryUsage {
            path: format!("./d{i}"),
            size,
        })
        .collect()
}

proptest! {
    #[test]
    fn ratio_bar_truncates_to_exact_length(
        ratio in 0.0f64..=1.0,
        length in 0usize..200,
    ) {
        let bar = ratio_bar(ratio, length);
        prop_assert_eq!(bar.chars().count(), length);
        prop_assert_eq!(count(&bar, '#'), (ratio * length as f64) as usize);
        prop_assert_eq!(count(&bar, ' '), length - count(&bar, '#'));
    }

    #[test]
    fn ratio_bar_never_overflows(
        ratio in -10.0f64..10.0,
        length in 0usize..200,
    ) {
        prop_assert_eq!(ratio_bar(ratio, length).chars().count(), length);
    }

    #[test]
    fn percent_bar_rounds_to_exact_length(
        percent in 0.0f64..=100.0,
        length in 0usize..200,
    ) {
        let bar = percent_bar(percent, length).unwrap();
        let expected = (percent / 100.0 * length as f64).round_ties_even() as usize;
        prop_assert_eq!(bar.chars().count(), length);
        prop_assert_eq!(count(&bar, '='), expected);
    }

    #[test]
    fn percent_bar_rejects_above_range(percent in 100.001f64..1e9) {
        prop_assert!(percent_bar(percent, 20).is_err());
    }

    #[test]
    fn percent_bar_rejects_below_range(percent in -1e9f64..-0.001) {
        prop_assert!(percent_bar(percent, 20).is_err());
    }

    #[test]
    fn small_kibibytes_stay_in_kib(kib in 0u64..=1024) {
        prop_assert!(kibibytes_to_human(kib, 2).ends_with(" KiB"));
    }

    #[test]
    fn small_bytes_stay_in_bytes(bytes in 0u64..1024) {
        prop_assert_eq!(bytes_to_human(bytes, 2), format!("{bytes}.00 B"));
    }

    #[test]
    fn disk_report_has_one_line_per_entry_plus_total(
        sizes in prop::collection::vec(0u64..1_000_000, 1..50),
    ) {
        let entries = make_entries(&sizes);
        let lines = render_report(".", &entries, &DiskReportOptions::default()).unwrap();
        prop_assert_eq!(lines.len(), entries.len() + 1);
        let total: u64 = sizes.iter().sum();
        prop_assert_eq!(lines.last().unwrap(), &format!("Total: {total} B   ."));
        for (line, entry) in lines.iter().zip(&entries) {
            prop_assert!(line.ends_with(&format!("\t{}", entry.path)), "unexpected line {}", line);
        }
    }
}
