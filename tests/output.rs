use td::output::{format_human, HumanOutput};

#[test]
fn format_human_includes_sections() {
    let mut human = HumanOutput::new("Task added: \"Buy milk\"");
    human.push_summary("tasks", "showing 3 tasks (1 done, 2 pending)");
    human.push_detail("[ ] #4 Buy milk");
    human.push_warning("page is past the end of the list");
    human.push_next_step("td list");

    let rendered = format_human(&human);
    assert!(rendered.contains("Task added: \"Buy milk\""));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- tasks: showing 3 tasks (1 done, 2 pending)"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- [ ] #4 Buy milk"));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- page is past the end of the list"));
    assert!(rendered.contains("Next steps:"));
    assert!(rendered.contains("- td list"));
}

#[test]
fn format_human_omits_empty_sections() {
    let human = HumanOutput::new("Task #3 unchanged");
    let rendered = format_human(&human);
    assert_eq!(rendered, "Task #3 unchanged");
}
