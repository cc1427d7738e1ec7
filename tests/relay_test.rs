//! Anonymous relay and passive reactions
//! Run with: cargo test --test relay_test

mod common;

use common::*;
use haven_bot::application::messaging::{Dispatch, MessageDispatcher};
use haven_bot::application::services::relay_service::MAX_MESSAGE_CHARS;
use haven_bot::application::services::{RelayOutcome, RelayService};
use haven_bot::domain::entities::Reply;

#[tokio::test]
async fn test_dm_is_forwarded_once_without_identity() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let msg = direct_message("1", "today was really hard");
    let dispatch = dispatcher.process(&bot, &registry, &msg).await;
    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::Delivered));

    let posts = bot.channel_posts(RELAY_CHANNEL);
    assert_eq!(posts.len(), 1);
    let Reply::Text(text) = &posts[0] else {
        panic!("relay should post text");
    };
    assert!(text.starts_with("**Anonymous Vent:**"));
    assert!(text.ends_with("today was really hard"));
    assert!(!text.contains("river"));
    assert!(!text.contains("42"));

    assert_eq!(
        bot.dms(),
        vec!["Your message has been sent anonymously to the venting channel. ❤️"]
    );
    assert_eq!(bot.sent().len(), 2);
}

#[tokio::test]
async fn test_dm_never_parses_commands_or_reacts() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let msg = direct_message("1", "!color #FFF I'm trans");
    dispatcher.process(&bot, &registry, &msg).await;

    assert!(bot.reactions().is_empty());
    assert!(bot.replies().is_empty());
    assert!(registry.mutations().is_empty());
    assert_eq!(bot.channel_posts(RELAY_CHANNEL).len(), 1);
}

#[tokio::test]
async fn test_unresolvable_channel_sends_config_notice() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    bot.channels.lock().unwrap().clear();
    let registry = FlakyRegistry::new();

    let dispatch = dispatcher.process(&bot, &registry, &direct_message("1", "hi")).await;

    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::ChannelUnavailable));
    assert!(bot.channel_posts(RELAY_CHANNEL).is_empty());
    assert_eq!(
        bot.dms(),
        vec!["The venting channel is not available on the server. Please ask a moderator to set it up."]
    );
}

#[tokio::test]
async fn test_unconfigured_channel_sends_config_notice() {
    ensure_init();
    let mut config = config();
    config.discord.relay_channel_id = None;
    let dispatcher = MessageDispatcher::from_config(&config);
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let dispatch = dispatcher.process(&bot, &registry, &direct_message("1", "hi")).await;
    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::ChannelUnavailable));
    assert_eq!(bot.dms().len(), 1);
}

#[tokio::test]
async fn test_delivery_failure_sends_retry_notice() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    *bot.fail_channel_send.lock().unwrap() = true;
    let registry = FlakyRegistry::new();

    let dispatch = dispatcher.process(&bot, &registry, &direct_message("1", "hi")).await;

    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::DeliveryFailed));
    assert_eq!(
        bot.dms(),
        vec!["I encountered an error while sending your message. Please try again later."]
    );
}

#[tokio::test]
async fn test_trans_reaction_on_plain_and_command_messages() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let plain = dispatcher.process(&bot, &registry, &guild_message("1", "TRANS rights!")).await;
    assert_eq!(plain, Dispatch::Passive);

    dispatcher.process(&bot, &registry, &guild_message("2", "!pronouns trans/fem")).await;
    dispatcher.process(&bot, &registry, &guild_message("3", "!nope Trans")).await;
    dispatcher.process(&bot, &registry, &guild_message("4", "good morning")).await;

    assert_eq!(bot.reactions(), vec!["🏳️‍⚧️"; 3]);
    assert_eq!(registry.inner.member_role_names("42").await, vec!["trans/fem"]);
}

#[tokio::test]
async fn test_reaction_failure_is_swallowed() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    *bot.fail_react.lock().unwrap() = true;
    let registry = FlakyRegistry::new();

    let dispatch = dispatcher.process(&bot, &registry, &guild_message("1", "!uwu trans joy")).await;

    assert_eq!(dispatch, Dispatch::Command { name: "uwu".to_string(), ok: true });
    assert_eq!(bot.replies(), vec!["twans joy uwu"]);
    assert!(bot.reactions().is_empty());
}

#[tokio::test]
async fn test_custom_triggers_can_all_fire() {
    ensure_init();
    let mut config = config();
    config.reactions.push(haven_bot::infrastructure::config::ReactionTrigger {
        trigger: "pride".to_string(),
        emoji: "🏳️‍🌈".to_string(),
    });
    let dispatcher = MessageDispatcher::from_config(&config);
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    dispatcher.process(&bot, &registry, &guild_message("1", "trans pride month")).await;

    assert_eq!(bot.reactions(), vec!["🏳️‍⚧️", "🏳️‍🌈"]);
}

#[tokio::test]
async fn test_oversized_dm_gets_length_notice() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let msg = direct_message("1", &"a".repeat(2000));
    let dispatch = dispatcher.process(&bot, &registry, &msg).await;

    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::TooLong));
    assert!(bot.channel_posts(RELAY_CHANNEL).is_empty());
    assert_eq!(
        bot.dms(),
        vec!["Your message is too long to relay. Please split it into shorter messages and send them one at a time."]
    );
}

#[tokio::test]
async fn test_dm_at_the_length_limit_is_delivered() {
    let dispatcher = dispatcher();
    let bot = RecordingBot::new();
    let registry = FlakyRegistry::new();

    let room = MAX_MESSAGE_CHARS - RelayService::format("").chars().count();
    let msg = direct_message("1", &"é".repeat(room));
    let dispatch = dispatcher.process(&bot, &registry, &msg).await;

    assert_eq!(dispatch, Dispatch::Relayed(RelayOutcome::Delivered));
    assert_eq!(bot.channel_posts(RELAY_CHANNEL).len(), 1);
}
