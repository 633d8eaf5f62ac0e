//! Service integration tests.
//!
//! These run every service against an in-memory SQLite database with the
//! real migrations applied.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use snapfeed_common::{AppError, IdGenerator, Identity, config::FollowConfig};
use snapfeed_core::{
    AddCommentInput, BookmarkService, CommentService, CreatePostInput, CreateUserInput,
    FollowService, FollowState, NotificationService, PostService, UpdateProfileInput,
    UserService,
};
use snapfeed_db::{
    entities::{follow, notification::NotificationType, user},
    repositories::{
        BookmarkRepository, CommentRepository, FollowRepository, NotificationRepository,
        PostRepository, UserRepository,
    },
    test_utils::setup_test_db,
};
use std::sync::Arc;

struct Services {
    users: UserService,
    follows: FollowService,
    notifications: NotificationService,
    posts: PostService,
    bookmarks: BookmarkService,
    comments: CommentService,
}

fn build_services(db: DatabaseConnection, follow_config: FollowConfig) -> Services {
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let bookmark_repo = BookmarkRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    Services {
        users: UserService::new(user_repo.clone()),
        follows: FollowService::new(follow_repo, user_repo.clone(), follow_config),
        notifications: NotificationService::new(
            notification_repo,
            user_repo.clone(),
            post_repo.clone(),
        ),
        posts: PostService::new(post_repo.clone(), user_repo.clone()),
        bookmarks: BookmarkService::new(bookmark_repo, post_repo, user_repo.clone()),
        comments: CommentService::new(comment_repo, user_repo),
    }
}

async fn setup() -> Services {
    let db = setup_test_db().await.expect("test database");
    build_services(db, FollowConfig::default())
}

fn user_input(name: &str) -> CreateUserInput {
    CreateUserInput {
        username: name.to_string(),
        fullname: format!("{name} Example"),
        email: format!("{name}@example.com"),
        bio: None,
        image: format!("https://img.example.com/{name}.png"),
        clerk_id: format!("user_{name}"),
    }
}

async fn create_user(services: &Services, name: &str) -> (user::Model, Identity) {
    let user = services.users.create_user(user_input(name)).await.unwrap();
    let identity = Identity::verified(user.clerk_id.clone());
    (user, identity)
}

#[tokio::test]
async fn test_create_user_twice_keeps_one_record() {
    let services = setup().await;

    let first = services.users.create_user(user_input("alice")).await.unwrap();
    let mut again = user_input("alice");
    again.fullname = "Changed".to_string();
    let second = services.users.create_user(again).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.fullname, "alice Example");

    let found = services.users.get_by_clerk_id("user_alice").await.unwrap();
    assert_eq!(found.unwrap().id, first.id);
}

#[tokio::test]
async fn test_follow_updates_counters_and_notifies() {
    let services = setup().await;
    let (alice, alice_id) = create_user(&services, "alice").await;
    let (bob, bob_id) = create_user(&services, "bob").await;

    let state = services
        .follows
        .toggle_follow(&alice_id, &bob.id)
        .await
        .unwrap();
    assert_eq!(state, FollowState::Followed);

    let alice_after = services.users.get_profile(&alice.id).await.unwrap();
    let bob_after = services.users.get_profile(&bob.id).await.unwrap();
    assert_eq!(alice_after.following, 1);
    assert_eq!(alice_after.followers, 0);
    assert_eq!(bob_after.followers, 1);
    assert_eq!(bob_after.following, 0);

    assert!(services.follows.is_following(&alice_id, &bob.id).await.unwrap());
    assert!(!services.follows.is_following(&bob_id, &alice.id).await.unwrap());

    let inbox = services.notifications.get_notifications(&bob_id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, NotificationType::Follow);
    assert_eq!(inbox[0].sender.as_ref().unwrap().id, alice.id);
}

#[tokio::test]
async fn test_toggle_twice_restores_baseline() {
    let services = setup().await;
    let (alice, alice_id) = create_user(&services, "alice").await;
    let (bob, bob_id) = create_user(&services, "bob").await;

    services.follows.toggle_follow(&alice_id, &bob.id).await.unwrap();
    let state = services
        .follows
        .toggle_follow(&alice_id, &bob.id)
        .await
        .unwrap();
    assert_eq!(state, FollowState::Unfollowed);

    let alice_after = services.users.get_profile(&alice.id).await.unwrap();
    let bob_after = services.users.get_profile(&bob.id).await.unwrap();
    assert_eq!(alice_after.following, 0);
    assert_eq!(bob_after.followers, 0);
    assert!(!services.follows.is_following(&alice_id, &bob.id).await.unwrap());
    assert_eq!(services.follows.count_edges(&bob.id).await.unwrap(), (0, 0));

    let inbox = services.notifications.get_notifications(&bob_id).await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].notification_type, NotificationType::Unfollow);
    assert_eq!(inbox[1].notification_type, NotificationType::Follow);
}

#[tokio::test]
async fn test_follow_missing_target_skips_counters() {
    let services = setup().await;
    let (alice, alice_id) = create_user(&services, "alice").await;

    let state = services
        .follows
        .toggle_follow(&alice_id, "nonexistent")
        .await
        .unwrap();
    assert_eq!(state, FollowState::Followed);

    let alice_after = services.users.get_profile(&alice.id).await.unwrap();
    assert_eq!(alice_after.following, 0);

    let entries = services.follows.get_following(&alice_id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].user_id, "nonexistent");
    assert!(entries[1].username.is_none());
    assert!(entries[1].image.is_none());
}

#[tokio::test]
async fn test_toggle_follow_unregistered_caller() {
    let services = setup().await;
    let (bob, _) = create_user(&services, "bob").await;

    let result = services
        .follows
        .toggle_follow(&Identity::verified("user_ghost"), &bob.id)
        .await;
    assert!(matches!(result, Err(AppError::CallerNotFound(_))));

    let result = services
        .follows
        .toggle_follow(&Identity::anonymous(), &bob.id)
        .await;
    assert!(matches!(result, Err(AppError::Unauthenticated)));
}

#[tokio::test]
async fn test_self_follow_allowed_by_config() {
    let db = setup_test_db().await.unwrap();
    let services = build_services(
        db,
        FollowConfig {
            allow_self_follow: true,
            ..FollowConfig::default()
        },
    );
    let (alice, alice_id) = create_user(&services, "alice").await;

    let state = services
        .follows
        .toggle_follow(&alice_id, &alice.id)
        .await
        .unwrap();
    assert_eq!(state, FollowState::Followed);

    let alice_after = services.users.get_profile(&alice.id).await.unwrap();
    assert_eq!(alice_after.following, 1);
    assert_eq!(alice_after.followers, 1);
}

#[tokio::test]
async fn test_get_following_with_no_follows_has_only_self_entry() {
    let services = setup().await;
    let (alice, alice_id) = create_user(&services, "alice").await;

    let entries = services.follows.get_following(&alice_id).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_self);
    assert_eq!(entries[0].user_id, alice.id);
    assert_eq!(entries[0].username.as_deref(), Some("Your story"));
    assert_eq!(entries[0].image.as_deref(), Some(alice.image.as_str()));
}

#[tokio::test]
async fn test_get_following_is_newest_first() {
    let services = setup().await;
    let (_, alice_id) = create_user(&services, "alice").await;
    let (bob, _) = create_user(&services, "bob").await;
    let (carol, _) = create_user(&services, "carol").await;

    services.follows.toggle_follow(&alice_id, &bob.id).await.unwrap();
    services.follows.toggle_follow(&alice_id, &carol.id).await.unwrap();

    let entries = services.follows.get_following(&alice_id).await.unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.user_id.as_str()).collect();

    assert_eq!(entries.len(), 3);
    assert_eq!(ids[1], carol.id);
    assert_eq!(ids[2], bob.id);
    assert_eq!(entries[1].username.as_deref(), Some("carol"));

    let followers = services.follows.get_followers(&bob.id).await.unwrap();
    assert_eq!(followers.len(), 1);
}

#[tokio::test]
async fn test_update_profile_only_touches_caller() {
    let services = setup().await;
    let (alice, alice_id) = create_user(&services, "alice").await;
    let (bob, _) = create_user(&services, "bob").await;

    let updated = services
        .users
        .update_profile(
            &alice_id,
            UpdateProfileInput {
                image: "https://img.example.com/new.png".to_string(),
                fullname: "Alice Renamed".to_string(),
                bio: Some("Photographer".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.fullname, "Alice Renamed");
    assert_eq!(updated.bio.as_deref(), Some("Photographer"));
    assert_eq!(updated.username, alice.username);

    let bob_after = services.users.get_profile(&bob.id).await.unwrap();
    assert_eq!(bob_after.fullname, bob.fullname);
    assert_eq!(bob_after.image, bob.image);
    assert!(bob_after.bio.is_none());
}

#[tokio::test]
async fn test_bookmark_of_deleted_post_reads_as_none() {
    let services = setup().await;
    let (_, alice_id) = create_user(&services, "alice").await;
    let (bob, bob_id) = create_user(&services, "bob").await;

    let kept = services
        .posts
        .create_post(
            &bob_id,
            CreatePostInput {
                image_url: "https://img.example.com/kept.jpg".to_string(),
                caption: None,
            },
        )
        .await
        .unwrap();
    let doomed = services
        .posts
        .create_post(
            &bob_id,
            CreatePostInput {
                image_url: "https://img.example.com/doomed.jpg".to_string(),
                caption: Some("soon gone".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(services.bookmarks.toggle_bookmark(&alice_id, &kept.id).await.unwrap());
    assert!(services.bookmarks.toggle_bookmark(&alice_id, &doomed.id).await.unwrap());

    services.posts.delete_post(&bob_id, &doomed.id).await.unwrap();

    let bookmarks = services.bookmarks.get_bookmarked_posts(&alice_id).await.unwrap();
    assert_eq!(bookmarks.len(), 2);
    assert!(bookmarks[0].is_none());
    assert_eq!(bookmarks[1].as_ref().unwrap().id, kept.id);

    let bob_after = services.users.get_profile(&bob.id).await.unwrap();
    assert_eq!(bob_after.posts, 1);
}

#[tokio::test]
async fn test_toggle_bookmark_twice_removes_it() {
    let services = setup().await;
    let (_, alice_id) = create_user(&services, "alice").await;

    let post = services
        .posts
        .create_post(
            &alice_id,
            CreatePostInput {
                image_url: "https://img.example.com/p.jpg".to_string(),
                caption: None,
            },
        )
        .await
        .unwrap();

    assert!(services.bookmarks.toggle_bookmark(&alice_id, &post.id).await.unwrap());
    assert!(!services.bookmarks.toggle_bookmark(&alice_id, &post.id).await.unwrap());
    assert!(
        services
            .bookmarks
            .get_bookmarked_posts(&alice_id)
            .await
            .unwrap()
            .is_empty()
    );

    let result = services.bookmarks.toggle_bookmark(&alice_id, "missing").await;
    assert!(matches!(result, Err(AppError::PostNotFound(_))));
}

#[tokio::test]
async fn test_comment_notifies_post_owner_but_not_self() {
    let services = setup().await;
    let (_, alice_id) = create_user(&services, "alice").await;
    let (_, bob_id) = create_user(&services, "bob").await;

    let post = services
        .posts
        .create_post(
            &bob_id,
            CreatePostInput {
                image_url: "https://img.example.com/p.jpg".to_string(),
                caption: None,
            },
        )
        .await
        .unwrap();

    services
        .comments
        .add_comment(
            &alice_id,
            &post.id,
            AddCommentInput {
                content: "Lovely light".to_string(),
            },
        )
        .await
        .unwrap();
    services
        .comments
        .add_comment(
            &bob_id,
            &post.id,
            AddCommentInput {
                content: "Thanks!".to_string(),
            },
        )
        .await
        .unwrap();

    let comments = services.comments.get_comments(&post.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Lovely light");
    assert_eq!(comments[0].user.fullname, "alice Example");
    assert_eq!(comments[1].content, "Thanks!");

    let posts = services.posts.get_posts_by_user(&post.user_id).await.unwrap();
    assert_eq!(posts[0].comments, 2);

    let inbox = services.notifications.get_notifications(&bob_id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, NotificationType::Comment);
    assert_eq!(inbox[0].post_id.as_deref(), Some(post.id.as_str()));
    assert_eq!(
        inbox[0].post_image_url.as_deref(),
        Some("https://img.example.com/p.jpg")
    );
}

#[tokio::test]
async fn test_delete_post_removes_comments() {
    let services = setup().await;
    let (_, alice_id) = create_user(&services, "alice").await;

    let post = services
        .posts
        .create_post(
            &alice_id,
            CreatePostInput {
                image_url: "https://img.example.com/p.jpg".to_string(),
                caption: None,
            },
        )
        .await
        .unwrap();
    services
        .comments
        .add_comment(
            &alice_id,
            &post.id,
            AddCommentInput {
                content: "first".to_string(),
            },
        )
        .await
        .unwrap();

    services.posts.delete_post(&alice_id, &post.id).await.unwrap();

    assert!(services.comments.get_comments(&post.id).await.unwrap().is_empty());
    let result = services.posts.delete_post(&alice_id, &post.id).await;
    assert!(matches!(result, Err(AppError::PostNotFound(_))));
}

fn follow_edge(id_gen: &IdGenerator, follower_id: &str, following_id: &str) -> follow::ActiveModel {
    follow::ActiveModel {
        id: Set(id_gen.generate()),
        follower_id: Set(follower_id.to_string()),
        following_id: Set(following_id.to_string()),
        created_at: Set(Utc::now().into()),
    }
}

fn user_row(id_gen: &IdGenerator, name: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(id_gen.generate()),
        username: Set(name.to_string()),
        fullname: Set(format!("{name} Example")),
        email: Set(format!("{name}@example.com")),
        bio: Set(None),
        image: Set(format!("https://img.example.com/{name}.png")),
        clerk_id: Set(format!("user_{name}")),
        followers: Set(0),
        following: Set(0),
        posts: Set(0),
        created_at: Set(Utc::now().into()),
    }
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_follow_edge() {
    let db = setup_test_db().await.expect("test database");
    let id_gen = IdGenerator::new();
    let db = Arc::new(db);
    let users = UserRepository::new(Arc::clone(&db));
    let alice = users.try_create(user_row(&id_gen, "alice")).await.unwrap().unwrap();
    let bob = users.try_create(user_row(&id_gen, "bob")).await.unwrap().unwrap();

    FollowRepository::create_in(&*db, follow_edge(&id_gen, &alice.id, &bob.id))
        .await
        .unwrap();
    let duplicate =
        FollowRepository::create_in(&*db, follow_edge(&id_gen, &alice.id, &bob.id)).await;

    assert!(matches!(duplicate, Err(AppError::Database(_))));
    let follows = FollowRepository::new(db);
    assert_eq!(follows.count_following(&alice.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_user_insert_conflict_on_clerk_id_yields_none() {
    let db = setup_test_db().await.expect("test database");
    let id_gen = IdGenerator::new();
    let users = UserRepository::new(Arc::new(db));

    let first = users.try_create(user_row(&id_gen, "alice")).await.unwrap();
    assert!(first.is_some());

    // Same clerk_id under a fresh primary key, as a concurrent create would write
    let mut racing = user_row(&id_gen, "alice");
    racing.username = Set("alice_two".to_string());
    let second = users.try_create(racing).await.unwrap();

    assert!(second.is_none());
    let stored = users.find_by_clerk_id("user_alice").await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
}
