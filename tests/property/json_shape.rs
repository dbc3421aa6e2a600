//! Property tests for the JSON wire shape of the shared API types.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use taskdeck_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskdeck_proto::task::{Task, TaskId};

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    // Any second within a few decades of the epoch, millisecond precision.
    (0i64..4_000_000_000, 0u32..1000).prop_map(|(secs, ms)| {
        Utc.timestamp_opt(secs, ms * 1_000_000)
            .single()
            .unwrap_or_default()
    })
}

fn arb_task() -> impl Strategy<Value = Task> {
    ("\\PC{1,64}", any::<bool>(), arb_timestamp(), arb_timestamp()).prop_map(
        |(text, completed, created_at, updated_at)| Task {
            id: TaskId::new(),
            text,
            completed,
            created_at,
            updated_at,
        },
    )
}

proptest! {
    #[test]
    fn task_round_trips_through_json(task in arb_task()) {
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, task);
    }

    #[test]
    fn task_json_always_carries_the_five_wire_fields(task in arb_task()) {
        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        prop_assert_eq!(obj.len(), 5);
        for key in ["id", "text", "completed", "createdAt", "updatedAt"] {
            prop_assert!(obj.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn update_round_trip_preserves_field_presence(
        text in proptest::option::of("\\PC{0,32}"),
        completed in proptest::option::of(any::<bool>()),
    ) {
        let req = UpdateTaskRequest { text: text.clone(), completed };
        let json = serde_json::to_string(&req).unwrap();
        let decoded: UpdateTaskRequest = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded.text, text);
        prop_assert_eq!(decoded.completed, completed);
    }

    #[test]
    fn create_trimmed_text_rejects_exactly_blank_input(text in "[ \\t]{0,8}") {
        // Whitespace-only text never yields a usable value.
        let req = CreateTaskRequest::new(text);
        prop_assert!(req.trimmed_text().is_none());
    }

    #[test]
    fn create_trimmed_text_is_trimmed_and_non_empty(text in "\\PC{0,32}") {
        let req = CreateTaskRequest::new(text.clone());
        match req.trimmed_text() {
            Some(trimmed) => {
                prop_assert_eq!(trimmed, text.trim());
                prop_assert!(!trimmed.is_empty());
            }
            None => prop_assert!(text.trim().is_empty()),
        }
    }
}
