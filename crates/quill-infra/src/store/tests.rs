use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};
use futures::StreamExt;

use quill_core::domain::{Author, Identity, NewPost, Post, PostUpdate};
use quill_core::feed::Cursor;
use quill_core::ports::{CommentStore, PostStore};
use quill_core::services::{ChatService, PostService};
use quill_core::{DomainError, StoreError};

use super::{Clock, InMemoryCommentStore, InMemoryMessageStore, InMemoryPostStore};

/// Clock that advances one second per reading.
fn ticking_clock() -> Clock {
    let tick = Arc::new(AtomicI64::new(1_700_000_000));
    Arc::new(move || {
        let secs = tick.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).unwrap()
    })
}

fn author(uid: &str) -> Author {
    Author {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
    }
}

fn new_post(uid: &str, title: &str) -> NewPost {
    NewPost::published(author(uid), title.to_string(), "body".to_string())
}

fn service() -> (PostService, Arc<InMemoryPostStore>) {
    let posts = Arc::new(InMemoryPostStore::with_clock(ticking_clock()));
    let comments = Arc::new(InMemoryCommentStore::with_clock(ticking_clock()));
    (PostService::new(posts.clone(), comments), posts)
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamp() {
    let store = InMemoryPostStore::with_clock(ticking_clock());

    let post = store.create(new_post("u1", "Hello")).await.unwrap();

    assert!(!post.id.is_empty());
    assert!(post.created_at.is_some());
    assert!(post.updated_at.is_none());
    assert_eq!(store.get(&post.id).await.unwrap(), Some(post));
}

#[tokio::test]
async fn test_posts_are_kept_newest_first() {
    let store = InMemoryPostStore::with_clock(ticking_clock());
    store.create(new_post("u1", "first")).await.unwrap();
    store.create(new_post("u1", "second")).await.unwrap();
    store.create(new_post("u2", "third")).await.unwrap();

    let page = store.fetch_page(None, 10).await.unwrap();
    let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let mine = store.list_by_author("u1").await.unwrap();
    let titles: Vec<_> = mine.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_update_and_delete_missing_post() {
    let store = InMemoryPostStore::new();
    let update = PostUpdate {
        title: "t".into(),
        content: "c".into(),
    };

    assert!(matches!(
        store.update("nope", update).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(store.delete("nope").await, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_update_stamps_updated_at() {
    let store = InMemoryPostStore::with_clock(ticking_clock());
    let post = store.create(new_post("u1", "draft")).await.unwrap();

    let updated = store
        .update(
            &post.id,
            PostUpdate {
                title: "final".into(),
                content: "new body".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at > post.created_at);
}

#[tokio::test]
async fn test_fetch_page_walks_with_cursor() {
    let store = InMemoryPostStore::with_clock(ticking_clock());
    for i in 0..5 {
        store.create(new_post("u1", &format!("p{i}"))).await.unwrap();
    }

    let first = store.fetch_page(None, 2).await.unwrap();
    let cursor = Cursor::after(first.last().unwrap());
    let second = store.fetch_page(Some(&cursor), 2).await.unwrap();
    let cursor = Cursor::after(second.last().unwrap());
    let third = store.fetch_page(Some(&cursor), 2).await.unwrap();

    let titles: Vec<_> = first
        .iter()
        .chain(&second)
        .chain(&third)
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["p4", "p3", "p2", "p1", "p0"]);
    assert_eq!(third.len(), 1);
}

#[tokio::test]
async fn test_cursor_wire_form_walks_sub_millisecond_imports() {
    let store = InMemoryPostStore::new();
    for (id, micros) in [("a", 1_000_700), ("b", 1_000_300), ("c", 999_900)] {
        store.insert(Post {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            author: None,
            created_at: Utc.timestamp_micros(micros).single(),
            updated_at: None,
            status: Default::default(),
        });
    }

    let mut seen = Vec::new();
    let mut cursor: Option<Cursor> = None;
    loop {
        let page = store.fetch_page(cursor.as_ref(), 1).await.unwrap();
        let Some(last) = page.last() else { break };
        seen.push(last.id.clone());
        cursor = Some(Cursor::after(last).to_string().parse().unwrap());
    }

    assert_eq!(seen, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_untimestamped_imports_sort_last() {
    let store = InMemoryPostStore::with_clock(ticking_clock());
    store.insert(Post {
        id: "legacy".to_string(),
        title: "legacy".to_string(),
        content: String::new(),
        author: None,
        created_at: None,
        updated_at: None,
        status: Default::default(),
    });
    store.create(new_post("u1", "fresh")).await.unwrap();

    let all = store.fetch_page(None, 10).await.unwrap();
    assert_eq!(all.last().unwrap().id, "legacy");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_subscribe_emits_full_snapshots() {
    let store = InMemoryPostStore::with_clock(ticking_clock());
    let mut snapshots = store.subscribe();

    assert_eq!(snapshots.next().await.unwrap().len(), 0);

    store.create(new_post("u1", "a")).await.unwrap();
    assert_eq!(snapshots.next().await.unwrap().len(), 1);

    let post = store.create(new_post("u1", "b")).await.unwrap();
    assert_eq!(snapshots.next().await.unwrap().len(), 2);

    store.delete(&post.id).await.unwrap();
    let latest = snapshots.next().await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].title, "a");
}

#[tokio::test]
async fn test_comment_thread_snapshots() {
    let comments = InMemoryCommentStore::with_clock(ticking_clock());
    let mut thread = comments.subscribe("p1");
    assert!(thread.next().await.unwrap().is_empty());

    let first = quill_core::domain::NewComment {
        text: "first".into(),
        user_email: "a@example.com".into(),
        user_id: "a".into(),
    };
    let second = quill_core::domain::NewComment {
        text: "second".into(),
        ..first.clone()
    };
    comments.add("p1", first).await.unwrap();
    assert_eq!(thread.next().await.unwrap().len(), 1);

    // Activity on another post does not produce a snapshot for p1.
    comments
        .add(
            "p2",
            quill_core::domain::NewComment {
                text: "elsewhere".into(),
                user_email: "b@example.com".into(),
                user_id: "b".into(),
            },
        )
        .await
        .unwrap();
    comments.add("p1", second).await.unwrap();

    let latest = thread.next().await.unwrap();
    let texts: Vec<_> = latest.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
    assert_eq!(comments.list("p2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_service_create_requires_identity_and_fields() {
    let (service, _) = service();
    let me = Identity::new("u1", "u1@example.com");

    let anonymous = service.create(None, "t".into(), "c".into()).await;
    assert!(matches!(anonymous, Err(DomainError::Unauthorized)));

    let blank = service.create(Some(&me), "  ".into(), "c".into()).await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));

    let post = service
        .create(Some(&me), "Title".into(), "Content".into())
        .await
        .unwrap();
    assert!(post.is_owned_by("u1"));
    assert_eq!(post.author_email(), "u1@example.com");
}

#[tokio::test]
async fn test_service_only_owner_edits_and_deletes() {
    let (service, store) = service();
    let owner = Identity::new("u1", "u1@example.com");
    let other = Identity::new("u2", "u2@example.com");
    let post = service
        .create(Some(&owner), "Mine".into(), "Body".into())
        .await
        .unwrap();

    let edit = service
        .edit(Some(&other), &post.id, "Hijacked".into(), "x".into())
        .await;
    assert!(matches!(edit, Err(DomainError::Forbidden(_))));

    let delete = service.delete(Some(&other), &post.id).await;
    assert!(matches!(delete, Err(DomainError::Forbidden(_))));
    assert_eq!(store.len(), 1);

    let edited = service
        .edit(Some(&owner), &post.id, "Still mine".into(), "Body 2".into())
        .await
        .unwrap();
    assert_eq!(edited.title, "Still mine");

    service.delete(Some(&owner), &post.id).await.unwrap();
    assert!(store.is_empty());

    let missing = service.delete(Some(&owner), &post.id).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_service_comments() {
    let (service, _) = service();
    let me = Identity::new("u1", "u1@example.com");
    let post = service
        .create(Some(&me), "Post".into(), "Body".into())
        .await
        .unwrap();

    let anonymous = service.add_comment(None, &post.id, "hi".into()).await;
    assert!(matches!(anonymous, Err(DomainError::Unauthorized)));

    let blank = service.add_comment(Some(&me), &post.id, "   ".into()).await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));

    let orphan = service.add_comment(Some(&me), "missing", "hi".into()).await;
    assert!(matches!(orphan, Err(DomainError::NotFound { .. })));

    let comment = service
        .add_comment(Some(&me), &post.id, "Nice post".into())
        .await
        .unwrap();
    assert_eq!(comment.user_id, "u1");
    assert_eq!(comment.user_email, "u1@example.com");

    let listed = service.comments(&post.id).await.unwrap();
    assert_eq!(listed, vec![comment]);
}

#[tokio::test]
async fn test_chat_rooms_follow_sign_in_state() {
    let chat = ChatService::new(Arc::new(InMemoryMessageStore::with_clock(ticking_clock())));
    let me = Identity::new("u1", "u1@example.com");

    chat.send(None, "hello?".into()).await.unwrap();
    chat.send(Some(&me), "first".into()).await.unwrap();
    let sent = chat.send(Some(&me), "second".into()).await.unwrap();
    assert!(sent.created_at.is_some());

    let mine: Vec<_> = chat
        .history(Some(&me))
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(mine, vec!["first", "second"]);

    let guest = chat.history(None).await.unwrap();
    assert_eq!(guest.len(), 1);
    assert_eq!(guest[0].text, "hello?");

    let blank = chat.send(Some(&me), "   ".into()).await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));
}
