// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end report flows through the dispatcher against a mock platform.

use std::sync::Arc;
use std::time::Duration;

use modmail_core::{
    Button, ChannelId, InteractionResponse, OptionValue, PlatformClient, RoleId, UserId,
};
use modmail_interactions::custom_id::{self, ReportConfig, ReportRoute};
use modmail_interactions::{
    DispatchOutcome, Dispatcher, ReportOutcome, ReportState, ReportWorkflow, SideEffect,
};
use modmail_test_utils::events::{self, CHANNEL, SUBMITTER};
use modmail_test_utils::{MockPlatform, PlatformCall, PlatformOp};
use tracing_test::traced_test;

const STAFF: ChannelId = ChannelId(300);

fn dispatcher(platform: &MockPlatform) -> Dispatcher {
    Dispatcher::new(Arc::new(platform.clone())).unwrap()
}

fn modal_id(config: ReportConfig) -> String {
    custom_id::encode(ReportRoute::Modal, &config)
}

#[tokio::test]
async fn default_config_creates_plain_report() {
    let platform = MockPlatform::new();
    let event = events::report_submission("/report-modal/0/0/0/0");

    let outcome = dispatcher(&platform).dispatch(&event).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            pattern: "/report-modal/{role}/{channel}/{max_active}/{slow_mode}".into()
        }
    );

    assert_eq!(
        platform.responses(),
        vec![InteractionResponse::Defer { ephemeral: true }]
    );

    let threads = platform.created_threads();
    assert_eq!(threads.len(), 1);
    let (parent, spec) = &threads[0];
    assert_eq!(*parent, CHANNEL);
    assert_eq!(spec.name, "Spam in #general");
    assert_eq!(spec.auto_archive_minutes, 10_080);
    assert!(!spec.invitable);

    // No mention, no slow mode, no mirror.
    let posts = platform.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].1.content, "<@42>");
    assert!(platform.rate_limits().is_empty());

    // No ceiling, so no membership queries either.
    assert!(
        !platform
            .calls()
            .iter()
            .any(|c| matches!(c, PlatformCall::ListActiveThreads(_)))
    );

    let follow_ups = platform.follow_ups();
    assert_eq!(follow_ups.len(), 1);
    assert_eq!(follow_ups[0].content, "Report created!");
    assert!(follow_ups[0].ephemeral);
}

#[tokio::test]
async fn full_config_mentions_mirrors_and_slows() {
    let platform = MockPlatform::new();
    let config = ReportConfig {
        role: Some(RoleId(7)),
        channel: Some(STAFF),
        max_active: 3,
        slow_mode: Duration::from_secs(90),
    };
    let event = events::report_submission(&modal_id(config));

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert_eq!(
        run.transitions,
        vec![
            ReportState::Received,
            ReportState::Validated,
            ReportState::Admitted,
            ReportState::ThreadCreated,
            ReportState::Announced,
            ReportState::Mirrored,
            ReportState::Acknowledged,
        ]
    );
    let ReportOutcome::Created {
        thread,
        announcement,
        slow_mode,
        mirror,
    } = run.outcome
    else {
        panic!("expected a created report, got {:?}", run.outcome);
    };
    assert_eq!(slow_mode, SideEffect::Applied);
    assert_eq!(mirror, SideEffect::Applied);
    assert_eq!(platform.rate_limits(), vec![(thread, 90)]);

    let posts = platform.posts();
    assert_eq!(posts[0].0, thread);
    assert_eq!(posts[0].1.content, "<@&7> <@42>");
    assert_eq!(posts[1].0, STAFF);
    assert_eq!(
        posts[1].1.content,
        "New report from <@42>: **Spam in #general**"
    );
    assert_eq!(
        posts[1].1.buttons,
        vec![Button::Link {
            url: announcement.jump_url.clone(),
            label: "View".into()
        }]
    );
}

#[tokio::test]
async fn legacy_identifier_without_trailing_fields_still_works() {
    let platform = MockPlatform::new();
    let event = events::report_submission("/report-modal/7");

    let outcome = dispatcher(&platform).dispatch(&event).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            pattern: "/report-modal/{role}".into()
        }
    );
    assert_eq!(platform.posts()[0].1.content, "<@&7> <@42>");
}

#[tokio::test]
async fn slow_mode_over_six_hours_is_rejected_before_side_effects() {
    let platform = MockPlatform::new();
    let event = events::report_submission("/report-modal/0/0/0/25200");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert_eq!(
        run.transitions,
        vec![ReportState::Received, ReportState::RejectedValidation]
    );
    assert!(platform.created_threads().is_empty());
    assert!(platform.posts().is_empty());
    let follow_ups = platform.follow_ups();
    assert_eq!(follow_ups.len(), 1);
    assert!(follow_ups[0].content.contains("6 hours"));
}

#[tokio::test]
async fn malformed_identifier_is_rejected_without_side_effects() {
    let platform = MockPlatform::new();
    let event = events::report_submission("/report-modal/abc/0/0/0");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert!(matches!(run.outcome, ReportOutcome::RejectedValidation { .. }));
    assert!(platform.created_threads().is_empty());
}

#[tokio::test]
async fn ceiling_reached_rejects_without_creating_thread() {
    let platform = MockPlatform::new();
    platform.add_thread(ChannelId(1), CHANNEL, &[SUBMITTER]);
    platform.add_thread(ChannelId(2), CHANNEL, &[SUBMITTER, UserId(99)]);
    let event = events::report_submission("/report-modal/0/0/2/0");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert_eq!(run.outcome, ReportOutcome::RejectedAdmission { ceiling: 2 });
    assert_eq!(run.final_state(), Some(ReportState::RejectedAdmission));
    assert!(platform.created_threads().is_empty());
    assert!(platform.follow_ups()[0].content.contains("2 open reports"));
}

#[tokio::test]
async fn limiter_failure_is_not_an_admission() {
    let platform = MockPlatform::new();
    platform.fail(PlatformOp::ListActiveThreads);
    let event = events::report_submission("/report-modal/0/0/1/0");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert_eq!(run.final_state(), Some(ReportState::Failed));
    assert!(platform.created_threads().is_empty());
    assert!(platform.follow_ups()[0].content.contains("Could not verify"));
}

#[tokio::test]
async fn thread_creation_failure_ends_the_run() {
    let platform = MockPlatform::new();
    platform.fail(PlatformOp::CreateThread);
    let event = events::report_submission("/report-modal/0/300/0/0");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    assert!(matches!(run.outcome, ReportOutcome::Failed { .. }));
    assert!(platform.posts().is_empty());
}

#[tokio::test]
#[traced_test]
async fn mirror_failure_still_acknowledges() {
    let platform = MockPlatform::new();
    platform.fail_posts_to(STAFF);
    let event = events::report_submission("/report-modal/0/300/0/0");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    let ReportOutcome::Created { mirror, .. } = &run.outcome else {
        panic!("expected a created report, got {:?}", run.outcome);
    };
    assert!(matches!(mirror, SideEffect::Degraded(_)));
    assert!(!run.transitions.contains(&ReportState::Mirrored));
    assert_eq!(run.final_state(), Some(ReportState::Acknowledged));
    assert_eq!(platform.follow_ups()[0].content, "Report created!");
    assert!(logs_contain("failed to post mirror notice"));
}

#[tokio::test]
#[traced_test]
async fn slow_mode_failure_is_best_effort() {
    let platform = MockPlatform::new();
    platform.fail(PlatformOp::SetRateLimit);
    let event = events::report_submission("/report-modal/0/0/0/60");

    let run = ReportWorkflow::new(&platform, &event).run().await.unwrap();
    let ReportOutcome::Created { slow_mode, .. } = &run.outcome else {
        panic!("expected a created report, got {:?}", run.outcome);
    };
    assert!(matches!(slow_mode, SideEffect::Degraded(_)));
    assert!(logs_contain("failed to set slow mode"));
}

#[tokio::test]
async fn acknowledgement_failure_propagates() {
    let platform = MockPlatform::new();
    platform.fail(PlatformOp::FollowUp);
    let event = events::report_submission("/report-modal/0/0/0/0");

    let err = ReportWorkflow::new(&platform, &event).run().await.unwrap_err();
    assert!(err.is_dependency());
    // The thread stays; nothing is rolled back.
    assert_eq!(platform.created_threads().len(), 1);
}

#[tokio::test]
async fn button_press_opens_form_with_same_config() {
    let platform = MockPlatform::new();
    let event = events::component("/report-button/7/300/2/90");

    dispatcher(&platform).dispatch(&event).await.unwrap();
    let responses = platform.responses();
    let [InteractionResponse::Modal(form)] = responses.as_slice() else {
        panic!("expected a modal, got {responses:?}");
    };
    assert_eq!(form.custom_id, "/report-modal/7/300/2/90");
    assert_eq!(form.title, "Report");
    assert_eq!(form.inputs.len(), 2);
    assert_eq!(form.inputs[0].min_length, Some(5));
    assert_eq!(form.inputs[0].max_length, Some(72));
    assert_eq!(form.inputs[1].min_length, Some(24));
}

#[tokio::test]
async fn malformed_button_gets_ephemeral_error() {
    let platform = MockPlatform::new();
    let event = events::component("/report-button/x");

    dispatcher(&platform).dispatch(&event).await.unwrap();
    let responses = platform.responses();
    let [InteractionResponse::Message(message)] = responses.as_slice() else {
        panic!("expected a message, got {responses:?}");
    };
    assert!(message.ephemeral);
}

#[tokio::test]
async fn create_report_button_round_trips_through_the_press() {
    let platform = MockPlatform::new();
    let command = events::command(
        "create-report-button",
        vec![
            ("label", OptionValue::String("Contact staff".into())),
            ("button-color", OptionValue::String("red".into())),
            ("channel", OptionValue::Channel(STAFF)),
            ("slow-mode", OptionValue::String("1m30s".into())),
        ],
    );
    dispatcher(&platform).dispatch(&command).await.unwrap();

    let responses = platform.responses();
    let [InteractionResponse::Message(message)] = responses.as_slice() else {
        panic!("expected a message, got {responses:?}");
    };
    assert!(!message.ephemeral);
    let [Button::Action { custom_id, label, .. }] = message.buttons.as_slice() else {
        panic!("expected one action button");
    };
    assert_eq!(label, "Contact staff");
    let (route, config) = custom_id::decode(custom_id).unwrap();
    assert_eq!(route, ReportRoute::Button);
    assert_eq!(config.channel, Some(STAFF));
    assert_eq!(config.slow_mode, Duration::from_secs(90));
}

#[tokio::test]
async fn create_report_button_rejects_long_slow_mode() {
    let platform = MockPlatform::new();
    let command = events::command(
        "create-report-button",
        vec![
            ("label", OptionValue::String("Report".into())),
            ("slow-mode", OptionValue::String("7h".into())),
        ],
    );
    dispatcher(&platform).dispatch(&command).await.unwrap();

    let responses = platform.responses();
    let [InteractionResponse::Message(message)] = responses.as_slice() else {
        panic!("expected a message, got {responses:?}");
    };
    assert!(message.ephemeral);
    assert!(message.buttons.is_empty());
    assert!(message.content.contains("cannot be longer than 6 hours"));
}

#[tokio::test]
async fn ping_and_help_reply() {
    let platform = MockPlatform::new();
    let dispatcher = dispatcher(&platform);
    dispatcher
        .dispatch(&events::command("ping", vec![]))
        .await
        .unwrap();

    let mut dm_help = events::command("help", vec![]);
    dm_help.guild_id = None;
    dispatcher.dispatch(&dm_help).await.unwrap();

    let responses = platform.responses();
    let [
        InteractionResponse::Message(pong),
        InteractionResponse::Message(help),
    ] = responses.as_slice()
    else {
        panic!("expected two messages, got {responses:?}");
    };
    assert_eq!(pong.content, "Pong!");
    assert!(pong.ephemeral);
    assert!(!help.ephemeral);
    assert_eq!(help.embeds[0].title.as_deref(), Some("Modmail Help"));
    assert_eq!(help.embeds[0].color, Some(0x20FF20));
}

#[tokio::test]
async fn unknown_interactions_are_ignored_silently() {
    let platform = MockPlatform::new();
    let dispatcher = dispatcher(&platform);

    let outcome = dispatcher
        .dispatch(&events::component("/something-else/1"))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
    let outcome = dispatcher
        .dispatch(&events::command("unknown", vec![]))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn too_many_fields_never_routes() {
    let platform = MockPlatform::new();
    let outcome = dispatcher(&platform)
        .dispatch(&events::report_submission("/report-modal/1/2/3/4/5"))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
}

#[tokio::test]
async fn dispatcher_exposes_shared_platform() {
    let platform = MockPlatform::new();
    let dispatcher = dispatcher(&platform);
    let shared: &Arc<dyn PlatformClient> = dispatcher.platform();
    shared
        .post_message(STAFF, modmail_core::MessageDraft::text("hello"))
        .await
        .unwrap();
    assert_eq!(platform.posts().len(), 1);
}
