//! Property-based tests for paper models.

use proptest::prelude::*;

use paperdeck::models::{AuthorRef, Paper};

/// Generate an arbitrary Paper.
fn arb_paper() -> impl Strategy<Value = Paper> {
    (
        "[A-Za-z0-9]{1,20}",                              // paper_id
        proptest::option::of("[A-Za-z0-9 \\-:,]{0,120}"), // title
        proptest::option::of(1900i32..2030),              // year
        proptest::option::of("[a-z]{3,12}"),              // paper_type
        any::<bool>(),                                    // selected
    )
        .prop_map(|(paper_id, title, year, paper_type, selected)| Paper {
            paper_id,
            title,
            paper_type,
            year,
            authors: vec![AuthorRef { id: Some("A1".into()), name: Some("Jane Roe".into()) }],
            url: None,
            pdf_url: None,
            selected,
        })
}

proptest! {
    /// Paper roundtrip serialization preserves everything except the
    /// transient selection flag, which is never emitted.
    #[test]
    fn paper_roundtrip(paper in arb_paper()) {
        let json = serde_json::to_value(&paper).expect("serialize");
        prop_assert!(json.get("selected").is_none());

        let decoded: Paper = serde_json::from_value(json).expect("deserialize");
        prop_assert_eq!(&paper.paper_id, &decoded.paper_id);
        prop_assert_eq!(&paper.title, &decoded.title);
        prop_assert_eq!(&paper.year, &decoded.year);
        prop_assert_eq!(&paper.paper_type, &decoded.paper_type);
        prop_assert!(!decoded.selected);
    }

    /// The forwarded upload filename always carries the paper id, keeps at
    /// most 50 title characters, and ends in `.pdf`.
    #[test]
    fn upload_filename_shape(paper in arb_paper()) {
        let name = paper.upload_filename();

        let prefix = format!("{}_", paper.paper_id);
        prop_assert!(name.starts_with(&prefix));
        prop_assert!(name.ends_with(".pdf"));

        let title_part = &name[paper.paper_id.len() + 1..name.len() - 4];
        prop_assert!(title_part.chars().count() <= 50);
    }

    /// Papers with a non-empty PDF URL are eligible, everything else is not.
    #[test]
    fn eligibility_tracks_pdf_url(mut paper in arb_paper(), url in proptest::option::of("[a-z]{0,20}")) {
        paper.pdf_url = url.clone();
        let expected = url.as_deref().is_some_and(|u| !u.is_empty());
        prop_assert_eq!(paper.is_eligible(), expected);
    }
}
