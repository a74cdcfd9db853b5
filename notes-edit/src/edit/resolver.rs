use crate::reminders::Reminder;

/// Maps selected reminder names back to canonical reminders.
///
/// Each name resolves to the first reminder carrying that name. A name with no
/// match keeps its position as `None`, and repeated names resolve repeatedly.
/// Nothing is resolved when either side is empty.
pub fn resolve<S: AsRef<str>>(selected_names: &[S], reminders: &[Reminder]) -> Vec<Option<Reminder>> {
    if reminders.is_empty() || selected_names.is_empty() {
        return Vec::new();
    }

    selected_names
        .iter()
        .map(|name| {
            reminders
                .iter()
                .find(|reminder| reminder.reminder_name == name.as_ref())
                .cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminders() -> Vec<Reminder> {
        vec![Reminder::new("1", "Doctor"), Reminder::new("2", "Gym")]
    }

    #[test]
    fn resolves_selected_name() {
        let resolved = resolve(&["Doctor"], &reminders());

        assert_eq!(resolved, vec![Some(Reminder::new("1", "Doctor"))]);
    }

    #[test]
    fn unmatched_name_keeps_its_slot() {
        let resolved = resolve(&["Unknown"], &[Reminder::new("1", "Doctor")]);

        assert_eq!(resolved, vec![None]);
    }

    #[test]
    fn keeps_selection_order() {
        let resolved = resolve(&["Gym", "Nope", "Doctor"], &reminders());

        assert_eq!(
            resolved,
            vec![
                Some(Reminder::new("2", "Gym")),
                None,
                Some(Reminder::new("1", "Doctor")),
            ]
        );
    }

    #[test]
    fn empty_inputs_resolve_to_nothing() {
        let no_names: [&str; 0] = [];

        assert!(resolve(&no_names, &reminders()).is_empty());
        assert!(resolve(&["Doctor"], &[]).is_empty());
    }

    #[test]
    fn repeated_names_are_not_deduplicated() {
        let resolved = resolve(&["Gym", "Gym"], &reminders());

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0], resolved[1]);
    }

    #[test]
    fn first_reminder_wins_for_shared_names() {
        let reminders = vec![Reminder::new("a", "Weekly"), Reminder::new("b", "Weekly")];

        let resolved = resolve(&["Weekly"], &reminders);

        assert_eq!(resolved, vec![Some(Reminder::new("a", "Weekly"))]);
    }
}
