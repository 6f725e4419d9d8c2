use autotag::ui;
use autotag::warning::PublishWarning;

// ============================================================================
// PublishWarning Display Tests
// ============================================================================

#[test]
fn test_warning_tag_already_exists_display() {
    let warning = PublishWarning::TagAlreadyExists {
        tag: "v1.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("already exists"),
        "Message should contain 'already exists', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
}

#[test]
fn test_warning_changelog_unavailable_display() {
    let warning = PublishWarning::ChangelogUnavailable {
        version: "2.1.0".to_string(),
        reason: "GitHub API returned 404 Not Found: Not Found".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("Failed to generate changelog"),
        "Message should explain the failure, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("Version 2.1.0"),
        "Message should name the fallback message, got: {}",
        display_msg
    );
}

#[test]
fn test_warning_orphaned_tag_object_shortens_sha() {
    let warning = PublishWarning::OrphanedTagObject {
        tag: "v3.0.0".to_string(),
        sha: "abc1234def5678".to_string(),
        reference: "refs/tags/v3.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("abc1234"),
        "Message should contain shortened sha 'abc1234', got: {}",
        display_msg
    );
    assert!(
        !display_msg.contains("abc1234d"),
        "Message should not contain the full sha, got: {}",
        display_msg
    );
    assert!(display_msg.contains("refs/tags/v3.0.0"));
}

#[test]
fn test_warning_orphaned_tag_object_short_sha_kept() {
    let warning = PublishWarning::OrphanedTagObject {
        tag: "v3.0.0".to_string(),
        sha: "abc".to_string(),
        reference: "refs/tags/v3.0.0".to_string(),
    };
    assert!(warning.to_string().contains("(abc)"));
}

#[test]
fn test_multiline_warning_as_workflow_command() {
    let warning = PublishWarning::ChangelogUnavailable {
        version: "1.0.0".to_string(),
        reason: "line one\nline two".to_string(),
    };

    let command = ui::workflow_command("warning", &warning.to_string());
    assert!(command.starts_with("::warning::"));
    assert!(!command.contains('\n'));
    assert!(command.contains("line one%0Aline two"));
}

#[test]
fn test_display_warning_does_not_panic() {
    ui::display_warning(&PublishWarning::TagAlreadyExists {
        tag: "v0.0.1".to_string(),
    });
}

#[test]
fn test_warning_orphaned_tag_object_multibyte_sha_does_not_panic() {
    let warning = PublishWarning::OrphanedTagObject {
        tag: "v3.0.0".to_string(),
        sha: "abcdeé01234".to_string(),
        reference: "refs/tags/v3.0.0".to_string(),
    };
    // Byte 7 falls inside 'é', so the sha is shown in full
    assert!(warning.to_string().contains("(abcdeé01234)"));
}
