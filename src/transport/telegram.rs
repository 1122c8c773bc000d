//! Telegram adapter built on `teloxide`.

use super::{ChatRef, ChatTransport, ListingBatches, TransportResult};
use crate::dispatch::{ActionRouter, InboundAction, UserInput};
use crate::user::domain::{UserId, UserProfile};
use crate::view::{InlineKeyboard, Markup, Screen};
use async_trait::async_trait;
use mockable::Clock;
use std::error::Error;
use std::sync::Arc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::payloads::{AnswerCallbackQuerySetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    ParseMode, ReplyMarkup, User,
};
use tracing::{debug, info, warn};

type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Sends screens through the Bot API and remembers each chat's last listing.
pub struct TelegramTransport {
    bot: Bot,
    listings: ListingBatches,
}

impl TelegramTransport {
    /// Creates a transport for `bot`.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            listings: ListingBatches::default(),
        }
    }

    async fn clear_listing(&self, chat: ChatRef) {
        for message_id in self.listings.take(chat).await {
            if let Err(err) = self.bot.delete_message(ChatId(chat.0), message_id).await {
                debug!(chat = %chat, message_id = message_id.0, error = %err, "stale listing message not deleted");
            }
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn deliver(&self, chat: ChatRef, screen: &Screen) -> TransportResult<()> {
        if screen.listing {
            self.clear_listing(chat).await;
        }
        let mut sent = Vec::with_capacity(screen.messages.len());
        for message in &screen.messages {
            let request = self
                .bot
                .send_message(ChatId(chat.0), message.text.clone())
                .parse_mode(ParseMode::Html);
            let delivered = match reply_markup(&message.markup) {
                Some(markup) => request.reply_markup(markup).await?,
                None => request.await?,
            };
            sent.push(delivered.id);
        }
        if screen.listing {
            self.listings.record(chat, sent).await;
        }
        Ok(())
    }
}

fn reply_markup(markup: &Markup) -> Option<ReplyMarkup> {
    match markup {
        Markup::None => None,
        Markup::Inline(keyboard) => Some(ReplyMarkup::InlineKeyboard(inline_markup(keyboard))),
        Markup::Menu(rows) => Some(ReplyMarkup::Keyboard(
            KeyboardMarkup::new(
                rows.iter()
                    .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>()),
            )
            .resize_keyboard(),
        )),
    }
}

fn inline_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.encode()))
            .collect::<Vec<_>>()
    }))
}

/// Converts a Telegram account into a profile.
///
/// Returns `None` for identifiers outside the signed 64-bit range.
#[must_use]
pub fn profile_of(user: &User) -> Option<UserProfile> {
    let id = i64::try_from(user.id.0).ok()?;
    let mut profile = UserProfile::new(UserId::new(id), user.full_name());
    if let Some(username) = &user.username {
        profile = profile.with_username(username.clone());
    }
    if let Some(language) = &user.language_code {
        profile = profile.with_language(language.clone());
    }
    Some(profile)
}

/// Shared state handed to update handlers.
pub struct BotContext<C>
where
    C: Clock + Send + Sync,
{
    router: ActionRouter<C>,
    transport: Arc<dyn ChatTransport>,
}

impl<C> BotContext<C>
where
    C: Clock + Send + Sync,
{
    /// Bundles the router with the transport replies go through.
    #[must_use]
    pub fn new(router: ActionRouter<C>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { router, transport }
    }
}

/// Long-polls Telegram until interrupted.
pub async fn run<C>(bot: Bot, context: Arc<BotContext<C>>)
where
    C: Clock + Send + Sync + 'static,
{
    info!("starting Telegram long polling");
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message::<C>))
        .branch(Update::filter_callback_query().endpoint(on_callback::<C>));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_message<C>(msg: Message, context: Arc<BotContext<C>>) -> HandlerResult
where
    C: Clock + Send + Sync + 'static,
{
    let (Some(text), Some(profile)) = (msg.text(), msg.from.as_ref().and_then(profile_of)) else {
        debug!(chat = msg.chat.id.0, "ignoring message without text or sender");
        return Ok(());
    };
    let chat = ChatRef(msg.chat.id.0);
    let action = InboundAction::new(profile, UserInput::from_text(text));
    let screen = context.router.handle(action).await.notice_as_message();
    if let Err(err) = context.transport.deliver(chat, &screen).await {
        warn!(chat = %chat, error = %err, "reply delivery failed");
    }
    Ok(())
}

async fn on_callback<C>(bot: Bot, query: CallbackQuery, context: Arc<BotContext<C>>) -> HandlerResult
where
    C: Clock + Send + Sync + 'static,
{
    let Some(profile) = profile_of(&query.from) else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };
    let chat = query
        .message
        .as_ref()
        .map_or(ChatRef(profile.id.value()), |message| ChatRef(message.chat().id.0));
    let payload = query.data.clone().unwrap_or_default();
    let screen = context
        .router
        .handle(InboundAction::new(profile, UserInput::Callback(payload)))
        .await;

    let answer = bot.answer_callback_query(query.id.clone());
    match screen.notice.as_deref() {
        Some(notice) => answer.text(notice).await?,
        None => answer.await?,
    };
    if let Err(err) = context.transport.deliver(chat, &screen).await {
        warn!(chat = %chat, error = %err, "reply delivery failed");
    }
    Ok(())
}
