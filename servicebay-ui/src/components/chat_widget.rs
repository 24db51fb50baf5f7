//! Chat Widget
//!
//! Floating booking assistant. Slot cards in a reply are clickable and
//! fill the input with a booking request; nothing is sent until the user
//! presses Send.

use leptos::*;

use servicebay::api::dto::{Slot, SlotData};
use servicebay::chat::{ChatMessage, ChatSession, Sender};

use super::loading::InlineLoading;
use crate::state::use_session;

#[component]
pub fn ChatWidget() -> impl IntoView {
    let session = use_session();
    let chat = create_rw_signal(ChatSession::new(session.user_id_untracked()));
    let (open, set_open) = create_signal(false);

    let send = move || {
        let text = chat.with_untracked(|c| c.input().to_string());
        let Some(request) = chat.try_update(|c| c.begin_send(&text)).flatten() else {
            return;
        };

        let api = session.api();
        spawn_local(async move {
            let result = api.chat(&request).await;
            chat.try_update(|c| c.finish_send(result));
        });
    };

    view! {
        <div class="fixed bottom-6 left-4 z-40">
            <Show
                when=move || open.get()
                fallback=move || view! {
                    <button
                        on:click=move |_| set_open.set(true)
                        class="w-14 h-14 rounded-full bg-primary-600 hover:bg-primary-700 shadow-lg text-2xl"
                        aria-label="Open booking assistant"
                    >
                        "💬"
                    </button>
                }
            >
                <div class="w-96 h-[32rem] bg-gray-800 border border-gray-700 rounded-xl shadow-xl flex flex-col">
                    <div class="flex items-center justify-between px-4 py-3 border-b border-gray-700">
                        <span class="font-semibold">"Booking Assistant"</span>
                        <button on:click=move |_| set_open.set(false) class="text-gray-400 hover:text-white">
                            "✕"
                        </button>
                    </div>

                    <div class="flex-1 overflow-y-auto p-4 space-y-3">
                        {move || {
                            chat.with(|c| {
                                c.messages()
                                    .iter()
                                    .map(|m| message_bubble(m, chat))
                                    .collect_view()
                            })
                        }}
                        <Show when=move || chat.with(|c| c.is_loading())>
                            <div class="flex items-center space-x-2 text-sm text-gray-400">
                                <InlineLoading />
                                <span>"Assistant is typing..."</span>
                            </div>
                        </Show>
                    </div>

                    <div class="p-3 border-t border-gray-700 flex space-x-2">
                        <input
                            type="text"
                            placeholder="Ask about availability..."
                            class="flex-1 bg-gray-700 rounded-lg px-3 py-2 text-sm focus:outline-none"
                            prop:value=move || chat.with(|c| c.input().to_string())
                            on:input=move |ev| chat.update(|c| c.set_input(event_target_value(&ev)))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    send();
                                }
                            }
                        />
                        <button
                            on:click=move |_| send()
                            disabled=move || chat.with(|c| c.is_loading())
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm disabled:opacity-50"
                        >
                            "Send"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn message_bubble(message: &ChatMessage, chat: RwSignal<ChatSession>) -> View {
    let (align, bubble) = match message.sender {
        Sender::User => ("justify-end", "bg-primary-600"),
        Sender::Bot => ("justify-start", "bg-gray-700"),
    };

    let cards = message.slots.clone().map(|data| slot_cards(data, chat));

    view! {
        <div class=format!("flex {}", align)>
            <div class=format!("max-w-[85%] rounded-lg px-3 py-2 {}", bubble)>
                <p class="text-sm whitespace-pre-wrap">{message.text.clone()}</p>
                {cards}
                <p class="text-[10px] text-gray-400 mt-1">
                    {message.timestamp.format("%H:%M").to_string()}
                </p>
            </div>
        </div>
    }
    .into_view()
}

fn slot_cards(data: SlotData, chat: RwSignal<ChatSession>) -> View {
    let date = data.date.clone();

    data.available_slots
        .into_iter()
        .map(|slot| slot_card(slot, date.clone(), chat))
        .collect_view()
}

fn slot_card(slot: Slot, date: Option<String>, chat: RwSignal<ChatSession>) -> View {
    let card = servicebay::chat::SlotCard::from(&slot);
    let status_class = if card.available {
        "text-green-400"
    } else {
        "text-red-400"
    };

    view! {
        <button
            on:click=move |_| chat.update(|c| c.select_slot(&slot, date.as_deref()))
            class="mt-2 w-full text-left bg-gray-800 hover:bg-gray-900 rounded-lg px-3 py-2"
        >
            <div class="text-sm font-medium">
                {card.start_label} " " {card.end_label}
            </div>
            <div class="flex justify-between text-xs mt-1">
                <span class=status_class>{card.status_label}</span>
                <span class="text-gray-400">{card.staffing_label}</span>
            </div>
        </button>
    }
    .into_view()
}
