use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::CourseSection;

/// Counts gathered while producing the cleaned dataset. Reporting only; the
/// cleaned sections themselves are the data contract.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    /// Sections in the input dump.
    pub input_total: usize,
    /// Sections removed because their schedule type is neither S nor L.
    pub removed_by_schd: usize,
    /// Courses dropped entirely because they only had lab sections.
    pub lab_only_dropped: usize,
    /// Sections in the cleaned output.
    pub output_total: usize,
    /// Distinct course codes in the output.
    pub unique_codes: usize,
    /// Distinct department tokens (first word of the course code) in the output.
    pub unique_departments: usize,
    /// Courses keeping more than one parallel S section.
    pub multi_section_courses: usize,
    /// Output sections with usable enrollment data.
    pub with_enrollment: usize,
    /// Output sections carrying designations.
    pub with_designations: usize,
}

/// Applies the catalog cleaning rules to one dump of course sections.
///
/// Rules, in order:
/// 1. keep only S and L schedule types (everything else, known or not, goes);
/// 2. within each course, keep all parallel S sections and drop the L ones;
/// 3. drop lab-only courses entirely;
/// 4. sort by course code then section label and assign sequential 1-based ids.
///
/// No section is synthesized: every output record is an input record with a
/// fresh `id`. Running the filter over its own output changes nothing.
pub fn filter_sections(sections: Vec<CourseSection>) -> (Vec<CourseSection>, FilterSummary) {
    let mut summary = FilterSummary {
        input_total: sections.len(),
        ..FilterSummary::default()
    };

    // Schedule-type allow-list. Discards I, E, 0, C, F and anything else.
    let kept: Vec<CourseSection> = sections
        .into_iter()
        .filter(|s| s.is_standard() || s.is_lab())
        .collect();
    summary.removed_by_schd = summary.input_total - kept.len();
    debug!(removed = summary.removed_by_schd, "schedule-type filter applied");

    // Group by course code to resolve the S/L rules per course.
    let mut by_code: HashMap<String, Vec<CourseSection>> = HashMap::new();
    for section in kept {
        by_code.entry(section.code.clone()).or_default().push(section);
    }

    let mut surviving = Vec::new();
    for group in by_code.into_values() {
        let standard_count = group.iter().filter(|s| s.is_standard()).count();
        if standard_count > 1 {
            summary.multi_section_courses += 1;
        }

        if standard_count > 0 {
            // Keep every parallel S section so downstream time filtering can
            // choose between them; labs are redundant once an S exists.
            surviving.extend(group.into_iter().filter(CourseSection::is_standard));
        } else if group.iter().any(CourseSection::is_lab) {
            // Lab-only course, drop the whole group.
            summary.lab_only_dropped += 1;
        } else {
            // Unreachable once the allow-list has run; kept so the grouping
            // rules stand on their own.
            surviving.extend(group);
        }
    }

    surviving.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.section.cmp(&b.section)));
    for (i, section) in surviving.iter_mut().enumerate() {
        section.id = Some(i as u64 + 1);
    }

    summary.output_total = surviving.len();
    summary.unique_codes = surviving
        .iter()
        .map(|s| s.code.as_str())
        .collect::<HashSet<_>>()
        .len();
    summary.unique_departments = surviving
        .iter()
        .map(CourseSection::department)
        .collect::<HashSet<_>>()
        .len();
    summary.with_enrollment = surviving
        .iter()
        .filter(|s| s.has_enrollment_data())
        .count();
    summary.with_designations = surviving.iter().filter(|s| s.has_designations()).count();

    (surviving, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(code: &str, label: &str, schd: &str) -> CourseSection {
        serde_json::from_value(json!({
            "code": code,
            "section": label,
            "schd": schd
        }))
        .unwrap()
    }

    fn keys(sections: &[CourseSection]) -> Vec<(String, String)> {
        sections
            .iter()
            .map(|s| (s.code.clone(), s.section.clone()))
            .collect()
    }

    #[test]
    fn lab_dropped_when_standard_section_exists() {
        let input = vec![
            section("CSCI 0150", "S01", "S"),
            section("CSCI 0150", "L01", "L"),
        ];
        let (output, summary) = filter_sections(input);

        assert_eq!(keys(&output), vec![("CSCI 0150".into(), "S01".into())]);
        assert_eq!(output[0].id, Some(1));
        assert_eq!(summary.output_total, 1);
        assert_eq!(summary.lab_only_dropped, 0);
    }

    #[test]
    fn lab_only_course_dropped_entirely() {
        let input = vec![section("MATH 0100", "L01", "L")];
        let (output, summary) = filter_sections(input);

        assert!(output.is_empty());
        assert_eq!(summary.lab_only_dropped, 1);
        assert_eq!(summary.output_total, 0);
    }

    #[test]
    fn parallel_standard_sections_all_kept() {
        let input = vec![
            section("ENGN 0031", "S02", "S"),
            section("ENGN 0031", "S01", "S"),
        ];
        let (output, summary) = filter_sections(input);

        assert_eq!(
            keys(&output),
            vec![
                ("ENGN 0031".into(), "S01".into()),
                ("ENGN 0031".into(), "S02".into()),
            ]
        );
        assert_eq!(output[0].id, Some(1));
        assert_eq!(output[1].id, Some(2));
        assert_eq!(summary.multi_section_courses, 1);
    }

    #[test]
    fn non_standard_schedule_types_removed() {
        let input = vec![
            section("CSCI 0150", "S01", "S"),
            section("CSCI 0150", "I01", "I"),
            section("HIST 0210", "E01", "E"),
            section("BIOL 0200", "C01", "C"),
            section("MUSC 0550", "F01", "F"),
            section("ECON 0110", "001", "0"),
            section("VISA 0100", "X01", "X"),
        ];
        let (output, summary) = filter_sections(input);

        assert_eq!(summary.removed_by_schd, 6);
        assert!(output.iter().all(|s| s.schd == "S" || s.schd == "L"));
        assert_eq!(keys(&output), vec![("CSCI 0150".into(), "S01".into())]);
    }

    #[test]
    fn empty_input_is_fine() {
        let (output, summary) = filter_sections(Vec::new());
        assert!(output.is_empty());
        assert_eq!(summary, FilterSummary::default());
    }

    #[test]
    fn output_sorted_by_code_then_section_with_dense_ids() {
        let input = vec![
            section("PHYS 0050", "S01", "S"),
            section("APMA 0350", "S02", "S"),
            section("APMA 0350", "S01", "S"),
            section("CSCI 0190", "S01", "S"),
        ];
        let (output, _) = filter_sections(input);

        let mut expected = keys(&output);
        expected.sort();
        assert_eq!(keys(&output), expected);

        let ids: Vec<u64> = output.iter().map(|s| s.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let input = vec![
            section("CSCI 0150", "S01", "S"),
            section("CSCI 0150", "L01", "L"),
            section("MATH 0100", "L01", "L"),
            section("ENGN 0031", "S01", "S"),
            section("ENGN 0031", "S02", "S"),
            section("HIST 0210", "E01", "E"),
        ];
        let (first, _) = filter_sections(input);
        let (second, summary) = filter_sections(first.clone());

        assert_eq!(keys(&first), keys(&second));
        assert_eq!(summary.removed_by_schd, 0);
        assert_eq!(summary.lab_only_dropped, 0);
    }

    #[test]
    fn original_fields_survive_filtering() {
        let input = vec![serde_json::from_value(json!({
            "code": "CSCI 0150",
            "section": "S01",
            "schd": "S",
            "title": "Intro to Object-Oriented Programming",
            "max_enrollment": 300,
            "designations": ["WRIT"],
            "id": 9999
        }))
        .unwrap()];
        let (output, summary) = filter_sections(input);

        assert_eq!(output.len(), 1);
        // Input id is overwritten, everything else passes through.
        assert_eq!(output[0].id, Some(1));
        assert_eq!(
            output[0].extra.get("title").and_then(|v| v.as_str()),
            Some("Intro to Object-Oriented Programming")
        );
        assert_eq!(summary.with_enrollment, 1);
        assert_eq!(summary.with_designations, 1);
    }

    #[test]
    fn summary_counts_departments_and_codes() {
        let input = vec![
            section("CSCI 0150", "S01", "S"),
            section("CSCI 0190", "S01", "S"),
            section("MATH 0540", "S01", "S"),
        ];
        let (_, summary) = filter_sections(input);

        assert_eq!(summary.unique_codes, 3);
        assert_eq!(summary.unique_departments, 2);
        assert_eq!(summary.multi_section_courses, 0);
    }
}
