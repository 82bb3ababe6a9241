//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rusqlite::params;

    fn entry(user: &str, category: EmotionCategory, sub: &str, text: &str) -> NewJournalEntry {
        NewJournalEntry {
            user_id: user.to_string(),
            category,
            sub_emotion: sub.to_string(),
            text: text.to_string(),
            photo_url: None,
            created_at: None,
        }
    }

    fn entry_at(
        user: &str,
        category: EmotionCategory,
        sub: &str,
        text: &str,
        at: chrono::DateTime<Utc>,
    ) -> NewJournalEntry {
        NewJournalEntry {
            created_at: Some(at),
            ..entry(user, category, sub, text)
        }
    }

    #[test]
    fn test_taxonomy_seeded_on_open() {
        let db = Database::in_memory().unwrap();

        let categories = db.list_categories().unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].category, EmotionCategory::Happy);
        assert_eq!(categories[0].color.as_deref(), Some("#FCD34D"));

        assert_eq!(db.list_sub_emotions(None).unwrap().len(), 50);
        assert_eq!(db.list_prompts(None).unwrap().len(), 50);
    }

    #[test]
    fn test_seed_taxonomy_is_idempotent() {
        let db = Database::in_memory().unwrap();
        db.seed_taxonomy().unwrap();
        db.seed_taxonomy().unwrap();

        assert_eq!(db.list_categories().unwrap().len(), 5);
        assert_eq!(db.list_sub_emotions(None).unwrap().len(), 50);
        assert_eq!(db.list_prompts(None).unwrap().len(), 50);
    }

    #[test]
    fn test_sub_emotions_by_category() {
        let db = Database::in_memory().unwrap();
        let sad = db.list_sub_emotions(Some(EmotionCategory::Sad)).unwrap();
        assert_eq!(sad.len(), 10);
        assert!(sad.iter().all(|s| s.category == EmotionCategory::Sad));
        assert!(sad.iter().all(|s| (1..=10).contains(&s.intensity)));
    }

    #[test]
    fn test_resolve_sub_emotion() {
        let db = Database::in_memory().unwrap();

        let joyful = db
            .resolve_sub_emotion(EmotionCategory::Happy, "joyful")
            .unwrap();
        assert_eq!(joyful.name, "Joyful");
        assert_eq!(joyful.intensity, 8);

        let err = db
            .resolve_sub_emotion(EmotionCategory::Sad, "Joyful")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_random_prompt_defaults_to_anxious() {
        let db = Database::in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let prompt = db.random_prompt(None, &mut rng).unwrap();
        assert_eq!(prompt.category, Some(EmotionCategory::Anxious));

        let calm = db
            .random_prompt(Some(EmotionCategory::Calm), &mut rng)
            .unwrap();
        assert_eq!(calm.category, Some(EmotionCategory::Calm));
    }

    #[test]
    fn test_entry_crud() {
        let db = Database::in_memory().unwrap();

        let created = db
            .create_entry(&entry(
                "u1",
                EmotionCategory::Happy,
                "grateful",
                "Lovely walk in the park",
            ))
            .unwrap();
        assert_eq!(created.sub_emotion, "Grateful");
        assert!(created.reflections.is_empty());
        assert!(uuid::Uuid::parse_str(&created.id).is_ok());

        let fetched = db.get_entry(&created.id).unwrap();
        assert_eq!(fetched.text, "Lovely walk in the park");
        assert_eq!(fetched.category, EmotionCategory::Happy);
    }

    #[test]
    fn test_get_missing_entry_is_not_found() {
        let db = Database::in_memory().unwrap();
        let err = db.get_entry("does-not-exist").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_create_entry_rejects_mismatched_sub_emotion() {
        let db = Database::in_memory().unwrap();
        let err = db
            .create_entry(&entry("u1", EmotionCategory::Calm, "Furious", "hmm"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_create_entry_rejects_empty_text() {
        let db = Database::in_memory().unwrap();
        let err = db
            .create_entry(&entry("u1", EmotionCategory::Calm, "Relaxed", "   "))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_append_reflection_preserves_order() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_entry(&entry_at(
                "u1",
                EmotionCategory::Anxious,
                "Worried",
                "Big exam tomorrow",
                Utc::now() - Duration::hours(2),
            ))
            .unwrap();

        db.append_reflection(&created.id, "first prompt", "first answer")
            .unwrap();
        let updated = db
            .append_reflection(&created.id, "second prompt", "second answer")
            .unwrap();

        assert_eq!(updated.reflections.len(), 2);
        assert_eq!(updated.reflections[0].prompt, "first prompt");
        assert_eq!(updated.reflections[1].response, "second answer");
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.text, created.text);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_append_reflection_to_missing_entry() {
        let db = Database::in_memory().unwrap();
        let err = db.append_reflection("nope", "p", "r").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_list_entries_newest_first_with_paging() {
        let db = Database::in_memory().unwrap();
        let now = Utc::now();
        for i in 0..5 {
            db.create_entry(&entry_at(
                if i % 2 == 0 { "u1" } else { "u2" },
                EmotionCategory::Calm,
                "Relaxed",
                &format!("entry {}", i),
                now - Duration::hours(10 - i),
            ))
            .unwrap();
        }

        let all = db.list_entries(0, 100).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].text, "entry 4");
        assert_eq!(all[4].text, "entry 0");

        let page = db.list_entries(1, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text, "entry 3");

        let mine = db.list_entries_for_user("u1", 0, 100).unwrap();
        assert_eq!(mine.len(), 3);
        assert!(mine.iter().all(|e| e.user_id == "u1"));
        assert_eq!(mine[0].text, "entry 4");
    }

    #[test]
    fn test_entries_in_window_bounds_and_order() {
        let db = Database::in_memory().unwrap();
        let now = Utc::now();

        // Inserted out of chronological order on purpose
        db.create_entry(&entry_at("u1", EmotionCategory::Sad, "Lonely", "b", now - Duration::days(1)))
            .unwrap();
        db.create_entry(&entry_at("u1", EmotionCategory::Happy, "Joyful", "a", now - Duration::days(3)))
            .unwrap();
        db.create_entry(&entry_at("u1", EmotionCategory::Happy, "Joyful", "old", now - Duration::days(8)))
            .unwrap();
        db.create_entry(&entry_at("u2", EmotionCategory::Happy, "Joyful", "other", now - Duration::days(1)))
            .unwrap();

        let window = db
            .entries_in_window("u1", now - Duration::days(7), now)
            .unwrap();
        let texts: Vec<&str> = window.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert_eq!(window[0].category, Some(EmotionCategory::Sad));
    }

    #[test]
    fn test_entries_in_window_sub_second_bounds() {
        use chrono::TimeZone;

        let db = Database::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap() + Duration::milliseconds(500);
        let start = now - Duration::days(7);

        db.create_entry(&entry_at("u1", EmotionCategory::Sad, "Lonely", "just before", start - Duration::milliseconds(400)))
            .unwrap();
        db.create_entry(&entry_at("u1", EmotionCategory::Calm, "Serene", "at start", start))
            .unwrap();
        db.create_entry(&entry_at("u1", EmotionCategory::Happy, "Joyful", "at end", now))
            .unwrap();
        db.create_entry(&entry_at("u1", EmotionCategory::Happy, "Joyful", "just after", now + Duration::milliseconds(300)))
            .unwrap();

        let window = db.entries_in_window("u1", start, now).unwrap();
        let texts: Vec<&str> = window.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["at start", "at end"]);
        assert_eq!(window[0].created_at, start);
    }

    #[test]
    fn test_entries_in_window_surfaces_unresolved_category() {
        let db = Database::in_memory().unwrap();
        let now = Utc::now();
        let conn = db.conn().unwrap();
        conn.execute(
            r#"
            INSERT INTO journal_entries (id, user_id, category_id, sub_emotion, text, created_at, updated_at)
            VALUES ('orphan', 'u1', 999, 'Mystery', 'lost category', ?1, ?1)
            "#,
            params![format_datetime(&(now - Duration::hours(1)))],
        )
        .unwrap();
        drop(conn);

        let window = db
            .entries_in_window("u1", now - Duration::days(7), now)
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].category, None);

        // Listings skip rows they cannot decode
        assert!(db.list_entries_for_user("u1", 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_user_crud() {
        let db = Database::in_memory().unwrap();

        let user = db
            .create_user(&NewUser {
                email: "ana@example.com".into(),
                username: "ana".into(),
                password: "hunter22".into(),
            })
            .unwrap();
        assert_eq!(user.username, "ana");
        assert!(db.verify_user_password(&user.id, "hunter22").unwrap());
        assert!(!db.verify_user_password(&user.id, "wrong").unwrap());

        let updated = db
            .update_user(
                &user.id,
                &UserUpdate {
                    username: Some("ana-b".into()),
                    password: Some("new-secret".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.username, "ana-b");
        assert_eq!(updated.email, "ana@example.com");
        assert!(db.verify_user_password(&user.id, "new-secret").unwrap());

        db.delete_user(&user.id).unwrap();
        assert!(matches!(db.get_user(&user.id), Err(Error::NotFound(_))));
        assert!(matches!(db.delete_user(&user.id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_password_is_not_stored_in_plaintext() {
        let db = Database::in_memory().unwrap();
        let user = db
            .create_user(&NewUser {
                email: "kai@example.com".into(),
                username: "kai".into(),
                password: "plaintext-pass".into(),
            })
            .unwrap();

        let conn = db.conn().unwrap();
        let stored: String = conn
            .query_row(
                "SELECT password_hash FROM users WHERE id = ?",
                params![user.id],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("plaintext-pass"));
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let db = Database::in_memory().unwrap();
        let new_user = NewUser {
            email: "sam@example.com".into(),
            username: "sam".into(),
            password: "pw".into(),
        };
        db.create_user(&new_user).unwrap();

        let dup_email = NewUser {
            username: "someone-else".into(),
            ..new_user.clone()
        };
        assert!(matches!(
            db.create_user(&dup_email),
            Err(Error::InvalidData(_))
        ));

        let dup_name = NewUser {
            email: "other@example.com".into(),
            ..new_user
        };
        assert!(matches!(
            db.create_user(&dup_name),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_user_streak_and_stats() {
        let db = Database::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let at = |day: u32, hour: u32| {
            NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
                .and_utc()
        };

        for (day, category, sub) in [
            (3, EmotionCategory::Sad, "Lonely"),
            (8, EmotionCategory::Happy, "Joyful"),
            (9, EmotionCategory::Happy, "Joyful"),
            (9, EmotionCategory::Calm, "Relaxed"),
            (10, EmotionCategory::Happy, "Grateful"),
        ] {
            db.create_entry(&entry_at("u1", category, sub, "text", at(day, 9)))
                .unwrap();
        }
        let first = db.list_entries_for_user("u1", 0, 10).unwrap();
        db.append_reflection(&first[0].id, "p", "r").unwrap();

        let streak = db.user_streak("u1", today).unwrap();
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.last_check_in_date, Some(today));

        let stats = db.user_stats("u1", today).unwrap();
        assert_eq!(stats.total_entries, 5);
        assert_eq!(stats.total_reflections, 1);
        assert_eq!(stats.emotions.len(), 5);
        assert_eq!(
            stats.emotions[0],
            NamedCount {
                name: "happy".into(),
                count: 3
            }
        );
        assert_eq!(
            stats.emotions[2],
            NamedCount {
                name: "angry".into(),
                count: 0
            }
        );
        assert_eq!(stats.sub_emotions[0].name, "Joyful");
        assert_eq!(stats.sub_emotions[0].count, 2);
    }

    #[test]
    fn test_audit_log() {
        let db = Database::in_memory().unwrap();
        db.log_audit("a@example.com", "create_entry", Some("journal_entry"), Some("abc"), None)
            .unwrap();
        db.log_audit("a@example.com", "delete_user", Some("user"), Some("u1"), Some("cleanup"))
            .unwrap();

        let log = db.list_audit_log(10).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].action, "delete_user");
        assert_eq!(log[1].entity_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_encrypted_database_requires_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enc.db");
        let path = path.to_str().unwrap();

        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        db.create_entry(&entry("u1", EmotionCategory::Calm, "Serene", "quiet morning"))
            .unwrap();
        drop(db);

        let reopened = Database::new_with_key(path, Some("correct horse")).unwrap();
        assert_eq!(reopened.list_entries(0, 10).unwrap().len(), 1);

        assert!(Database::new_unencrypted(path).is_err());
    }
}
