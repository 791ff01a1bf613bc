//! Maps an inbound event onto the subject whose text will be rewritten.

use tracing::debug;

use crate::domain::entities::{Event, RepoIdentity, Subject, SubjectContext};
use crate::domain::errors::RunError;

/// Issue actions whose body is processed.
pub const ISSUE_ACTIONS: [&str; 2] = ["opened", "edited"];

/// Comment actions whose body is processed. A missing action is also accepted.
pub const COMMENT_ACTIONS: [&str; 2] = ["created", "edited"];

/// Pure event classification, first matching shape wins:
///
/// 1. issue payload without a comment, action in [`ISSUE_ACTIONS`] → issue body;
/// 2. comment payload, action in [`COMMENT_ACTIONS`] or absent → comment body;
/// 3. anything else → [`RunError::NoProcessableSubject`].
pub struct EventClassifier;

impl EventClassifier {
    /// Classifies `event`. `fallback_repo` is the ambient `owner/name` used
    /// when the payload carries no usable repository.
    ///
    /// # Errors
    /// Returns [`RunError::MissingRepositoryContext`] if no repository can be
    /// determined, or [`RunError::NoProcessableSubject`] if no rule matches.
    pub fn classify(event: &Event, fallback_repo: Option<&str>) -> Result<SubjectContext, RunError> {
        let repo = Self::resolve_repository(event, fallback_repo)
            .ok_or(RunError::MissingRepositoryContext)?;

        let action = event.action();

        if let Some(issue) = &event.issue
            && event.comment.is_none()
            && action.is_some_and(|a| ISSUE_ACTIONS.contains(&a))
        {
            debug!(repo = %repo, number = issue.number, "Classified as issue body");
            return Ok(SubjectContext::new(
                repo,
                Subject::Issue {
                    number: issue.number,
                },
                issue.body.clone().unwrap_or_default(),
            ));
        }

        if let Some(comment) = &event.comment
            && action.is_none_or(|a| COMMENT_ACTIONS.contains(&a))
        {
            debug!(repo = %repo, id = comment.id, "Classified as comment body");
            return Ok(SubjectContext::new(
                repo,
                Subject::Comment {
                    id: comment.id,
                    issue_number: event.issue.as_ref().map(|i| i.number),
                },
                comment.body.clone().unwrap_or_default(),
            ));
        }

        debug!(action = ?action, "No processable subject in event");
        Err(RunError::NoProcessableSubject)
    }

    fn resolve_repository(event: &Event, fallback_repo: Option<&str>) -> Option<RepoIdentity> {
        event
            .repository
            .as_ref()
            .and_then(|r| RepoIdentity::parse(&r.full_name))
            .or_else(|| fallback_repo.and_then(RepoIdentity::parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SubjectKind;
    use test_case::test_case;

    fn event(json: &str) -> Event {
        Event::from_json(json).unwrap()
    }

    #[test_case("opened" ; "opened")]
    #[test_case("edited" ; "edited")]
    fn test_issue_actions(action: &str) {
        let e = event(&format!(
            r#"{{ "action": "{action}", "issue": {{ "number": 12, "body": "text" }},
                 "repository": {{ "full_name": "octo/widgets" }} }}"#
        ));

        let ctx = EventClassifier::classify(&e, None).unwrap();

        assert_eq!(ctx.subject, Subject::Issue { number: 12 });
        assert_eq!(ctx.text, "text");
        assert_eq!(ctx.repo.to_string(), "octo/widgets");
    }

    #[test_case(Some("created") ; "created")]
    #[test_case(Some("edited") ; "edited")]
    #[test_case(None ; "unset")]
    fn test_comment_actions(action: Option<&str>) {
        let action = action.map_or_else(String::new, |a| format!(r#""action": "{a}","#));
        let e = event(&format!(
            r#"{{ {action} "issue": {{ "number": 3 }}, "comment": {{ "id": 555, "body": "c" }},
                 "repository": {{ "full_name": "octo/widgets" }} }}"#
        ));

        let ctx = EventClassifier::classify(&e, None).unwrap();

        assert_eq!(ctx.subject.kind(), SubjectKind::Comment);
        assert_eq!(
            ctx.subject,
            Subject::Comment {
                id: 555,
                issue_number: Some(3)
            }
        );
        assert_eq!(ctx.text, "c");
    }

    #[test]
    fn test_missing_issue_body_is_empty_text() {
        let e = event(
            r#"{ "action": "opened", "issue": { "number": 1, "body": null },
                 "repository": { "full_name": "o/r" } }"#,
        );
        assert_eq!(EventClassifier::classify(&e, None).unwrap().text, "");
    }

    #[test_case(r#"{ "action": "closed", "issue": { "number": 1 } }"# ; "unaccepted_issue_action")]
    #[test_case(r#"{ "issue": { "number": 1 } }"# ; "issue_without_action")]
    #[test_case(r#"{ "action": "deleted", "comment": { "id": 1 } }"# ; "deleted_comment")]
    #[test_case(r#"{ "action": "opened" }"# ; "no_payload")]
    fn test_no_processable_subject(json: &str) {
        let e = event(json);
        let result = EventClassifier::classify(&e, Some("octo/widgets"));
        assert!(matches!(result, Err(RunError::NoProcessableSubject)));
    }

    #[test]
    fn test_repository_falls_back_to_ambient() {
        let e = event(r#"{ "action": "opened", "issue": { "number": 1, "body": "x" } }"#);

        let ctx = EventClassifier::classify(&e, Some("amb/ient")).unwrap();
        assert_eq!(ctx.repo, RepoIdentity::new("amb", "ient"));
    }

    #[test]
    fn test_event_repository_preferred_over_ambient() {
        let e = event(
            r#"{ "action": "opened", "issue": { "number": 1 },
                 "repository": { "full_name": "from/event" } }"#,
        );

        let ctx = EventClassifier::classify(&e, Some("amb/ient")).unwrap();
        assert_eq!(ctx.repo, RepoIdentity::new("from", "event"));
    }

    #[test]
    fn test_missing_repository_context() {
        let e = event(r#"{ "action": "opened", "issue": { "number": 1 } }"#);

        let result = EventClassifier::classify(&e, None);
        assert!(matches!(result, Err(RunError::MissingRepositoryContext)));

        let result = EventClassifier::classify(&e, Some("not-a-repo"));
        assert!(matches!(result, Err(RunError::MissingRepositoryContext)));
    }
}
