//! Record Tables
//!
//! Search box, sortable header, body and pager over a
//! [`ListView`] held in a signal, plus the fetch-on-mount helper every
//! list page uses.

use std::future::Future;

use leptos::*;

use servicebay::listing::{ColumnInfo, ListView, Listable};
use servicebay::ClientResult;

use super::{ErrorBanner, Loading};

/// Fetched list plus its loading and error flags
pub struct ListResource<T: Listable + 'static> {
    pub list: RwSignal<ListView<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Listable + 'static> Clone for ListResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Listable + 'static> Copy for ListResource<T> {}

/// Start a fetch into a new list. A failure shows `error_message` and
/// stops loading; the cause goes to the console.
pub fn load_list<T, F>(fetch: F, error_message: &'static str) -> ListResource<T>
where
    T: Listable + Clone + 'static,
    F: Future<Output = ClientResult<Vec<T>>> + 'static,
{
    let resource = ListResource {
        list: create_rw_signal(ListView::new(Vec::new())),
        loading: create_rw_signal(true),
        error: create_rw_signal(None),
    };

    spawn_local(async move {
        match fetch.await {
            Ok(items) => {
                resource.list.try_update(|l| l.set_items(items));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("{}: {}", error_message, e).into());
                resource.error.try_set(Some(error_message.to_string()));
            }
        }
        resource.loading.try_set(false);
    });

    resource
}

pub fn search_box<T>(list: RwSignal<ListView<T>>, placeholder: &'static str) -> impl IntoView
where
    T: Listable + Clone + 'static,
{
    view! {
        <input
            type="search"
            placeholder=placeholder
            class="w-full md:w-72 bg-gray-800 border border-gray-700 rounded-lg px-3 py-2 text-sm focus:outline-none focus:border-primary-500"
            prop:value=move || list.with(|l| l.query().to_string())
            on:input=move |ev| list.update(|l| l.set_query(event_target_value(&ev)))
        />
    }
}

fn sort_header<T>(list: RwSignal<ListView<T>>) -> impl IntoView
where
    T: Listable + Clone + 'static,
    T::Column: ColumnInfo,
{
    <T::Column as ColumnInfo>::ALL
        .iter()
        .map(|&(column, _, label)| {
            view! {
                <th
                    on:click=move |_| list.update(|l| l.sort_by(column))
                    class="px-4 py-3 text-left font-medium cursor-pointer select-none hover:text-white"
                >
                    {label}
                    <span class="ml-1 text-xs">
                        {move || list.with(|l| l.sort().indicator(column)).unwrap_or("")}
                    </span>
                </th>
            }
        })
        .collect_view()
}

fn pager<T>(list: RwSignal<ListView<T>>) -> impl IntoView
where
    T: Listable + Clone + 'static,
{
    view! {
        <div class="flex items-center justify-between mt-4 text-sm text-gray-400">
            <span>{move || format!("{} records", list.with(|l| l.filtered_count()))}</span>
            <div class="flex items-center space-x-2">
                <button
                    on:click=move |_| list.update(|l| l.prev_page())
                    disabled=move || list.with(|l| l.page() <= 1)
                    class="px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 disabled:opacity-40"
                >
                    "Prev"
                </button>
                <span>
                    {move || list.with(|l| format!("Page {} of {}", l.page(), l.page_count()))}
                </span>
                <button
                    on:click=move |_| list.update(|l| l.next_page())
                    disabled=move || list.with(|l| l.page() >= l.page_count())
                    class="px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 disabled:opacity-40"
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}

/// Sortable, paginated table. `actions` adds a trailing unsorted column.
pub fn data_table<T, F>(
    resource: ListResource<T>,
    actions: Option<&'static str>,
    render_row: F,
) -> impl IntoView
where
    T: Listable + Clone + 'static,
    T::Column: ColumnInfo,
    F: Fn(T) -> View + Copy + 'static,
{
    let list = resource.list;
    let columns = <T::Column as ColumnInfo>::ALL.len() + usize::from(actions.is_some());

    move || {
        if resource.loading.get() {
            return view! { <Loading /> }.into_view();
        }
        if let Some(message) = resource.error.get() {
            return view! { <ErrorBanner message=message /> }.into_view();
        }

        view! {
            <div class="bg-gray-800 rounded-xl overflow-x-auto border border-gray-700">
                <table class="w-full text-sm">
                    <thead class="bg-gray-700/60 text-gray-300">
                        <tr>
                            {sort_header(list)}
                            {actions.map(|label| view! { <th class="px-4 py-3 text-left font-medium">{label}</th> })}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-700">
                        {move || {
                            let rows = list.with(|l| l.visible());
                            if rows.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan=columns.to_string() class="px-4 py-8 text-center text-gray-400">
                                            "No records found"
                                        </td>
                                    </tr>
                                }
                                .into_view()
                            } else {
                                rows.into_iter().map(render_row).collect_view()
                            }
                        }}
                    </tbody>
                </table>
            </div>
            {pager(list)}
        }
        .into_view()
    }
}

/// `<td>` with the standard padding
pub fn cell(content: impl IntoView) -> impl IntoView {
    view! { <td class="px-4 py-3">{content}</td> }
}

pub fn opt(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
