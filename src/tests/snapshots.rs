use super::scenarios::{newsroom_input, newsroom_registry};
use crate::{MentionCombiner, MentionDisplay};

#[test]
fn newsroom_raw_mentions() {
    let (doc, batch) = newsroom_input();
    let display = MentionDisplay::new(&doc).with_raw(&batch);

    insta::assert_snapshot!(display, @r###"
    Alice met Bob at Lisbon Harbour on 2024-05-01.
    ╰───╯stat-ner: PERSON
              ╰─╯stat-ner: PERSON
                     ╰────────────╯stat-ner: ORGANIZATION
                     ╰────╯gazetteer: LOCATION
    ╰───╯rule-ner: PERSON
                                       ╰────────╯rule-ner: DATE
                                       ╰────────╯date-tagger: DATE
    "###);
}

#[test]
fn newsroom_consensus() {
    let registry = newsroom_registry();
    let (doc, batch) = newsroom_input();
    let (mentions, report) = MentionCombiner::new(&registry)
        .combine_with_report(&doc, &batch)
        .unwrap();

    let display = MentionDisplay::new(&doc)
        .with_final(&mentions)
        .with_rejected(&report);

    insta::assert_snapshot!(display, @r###"
    Alice met Bob at Lisbon Harbour on 2024-05-01.
    ╰───╯PERSON(rule-ner, stat-ner)
                     ╰────╯LOCATION(gazetteer)
                                       ╰────────╯DATE(date-tagger, rule-ner)
              ╰─╯✗PERSON 1/2
    "###);
}
