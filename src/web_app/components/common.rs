// web_app/components/common.rs - Reusable UI components
//
// These are small, composable components used throughout the application.
// Philosophy: Pure, stateless components that receive all data via props.

use leptos::prelude::*;
use rust_decimal::Decimal;

/// Loading spinner component
///
/// Displays a centered spinner with optional message.
#[component]
pub fn Loading(
    /// Optional message to display below the spinner
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center p-12">
            <div class="animate-spin rounded-full h-10 w-10 border-4 border-gray-200 border-t-indigo-600"></div>
            <span class="mt-4 text-gray-500 font-medium animate-pulse">{message}</span>
        </div>
    }
}

/// Error display component
///
/// Blocking error in place of content that could not be loaded.
#[component]
pub fn ErrorDisplay(
    /// The error message to display
    error: String,
) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 rounded-xl p-6 flex items-start gap-4">
            <div class="bg-red-100 p-2 rounded-full text-red-600">
                <span class="text-xl font-bold">"⚠"</span>
            </div>
            <div>
                <h3 class="text-red-800 font-bold mb-1">"Something went wrong"</h3>
                <p class="text-red-600 text-sm">{error}</p>
            </div>
        </div>
    }
}

/// Passive, dismissable notification
///
/// Renders nothing while `message` is None. Content already on screen stays
/// untouched underneath.
#[component]
pub fn Notice(
    #[prop(into)]
    message: Signal<Option<String>>,
    on_dismiss: Callback<()>,
    /// "error" or "success"
    #[prop(default = "error")]
    tone: &'static str,
) -> impl IntoView {
    let class = match tone {
        "success" => "fixed bottom-4 right-4 z-50 max-w-sm flex items-start gap-3 rounded-lg \
                      border border-green-200 bg-green-50 px-4 py-3 text-green-800 shadow-lg",
        _ => "fixed bottom-4 right-4 z-50 max-w-sm flex items-start gap-3 rounded-lg \
              border border-red-200 bg-red-50 px-4 py-3 text-red-800 shadow-lg",
    };

    move || {
        message.get().map(|text| {
            view! {
                <div class=class role="status">
                    <p class="text-sm flex-1">{text}</p>
                    <button
                        type="button"
                        class="text-sm font-bold opacity-60 hover:opacity-100"
                        title="Dismiss"
                        on:click=move |_| on_dismiss.run(())
                    >
                        "✕"
                    </button>
                </div>
            }
        })
    }
}

/// Placeholder for a list with nothing in it
#[component]
pub fn EmptyState(
    title: &'static str,
    #[prop(default = "")]
    hint: &'static str,
    #[prop(default = "📭")]
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="text-center py-16 bg-white rounded-2xl border border-dashed border-gray-300">
            <div class="text-gray-300 text-6xl mb-4">{icon}</div>
            <h3 class="text-xl font-bold text-gray-900 mb-2">{title}</h3>
            <p class="text-gray-500 max-w-md mx-auto">{hint}</p>
        </div>
    }
}

/// Primary button component
///
/// A styled button with hover effects.
#[component]
pub fn Button(
    /// Button label text
    children: Children,
    /// Click handler
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    /// Whether the button is disabled
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// Button type (submit, button, reset)
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_class = "px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 \
                      transition-colors disabled:bg-gray-400 disabled:cursor-not-allowed \
                      font-medium shadow-sm active:transform active:scale-95";

    view! {
        <button
            type=button_type
            disabled=move || disabled.get()
            class=format!("{} {}", base_class, class)
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Secondary button component
///
/// A lighter styled button for secondary actions.
#[component]
pub fn SecondaryButton(
    children: Children,
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
) -> impl IntoView {
    let class = "px-4 py-2 bg-white text-gray-700 rounded-lg hover:bg-gray-50 \
                 transition-colors border border-gray-300 disabled:opacity-50 \
                 font-medium shadow-sm active:bg-gray-100";

    view! {
        <button
            type="button"
            disabled=move || disabled.get()
            class=class
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Number of (full, half, empty) stars for a 0-5 rating
pub fn star_counts(rating: f64) -> (usize, bool, usize) {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = full < 5 && (rating - rating.floor()) >= 0.5;
    let empty = 5 - full - usize::from(half);
    (full, half, empty)
}

/// Star rating display component
///
/// Displays a star rating (0-5) with filled and empty stars.
#[component]
pub fn StarRating(
    /// The rating value (0.0 to 5.0)
    rating: f64,
    /// Whether to show the numeric value
    #[prop(default = true)]
    show_value: bool,
) -> impl IntoView {
    let (full_stars, has_half, empty_stars) = star_counts(rating);

    view! {
        <div class="flex items-center gap-0.5" title=format!("Rating: {:.1}", rating)>
            {(0..full_stars).map(|_| view! {
                <span class="text-yellow-400 text-lg">"★"</span>
            }).collect_view()}

            {has_half.then(|| view! {
                <div class="relative inline-block text-lg">
                    <span class="text-gray-200">"★"</span>
                    <span class="absolute top-0 left-0 overflow-hidden w-1/2 text-yellow-400">"★"</span>
                </div>
            })}

            {(0..empty_stars).map(|_| view! {
                <span class="text-gray-200 text-lg">"★"</span>
            }).collect_view()}

            <Show when=move || show_value>
                <span class="ml-2 text-sm font-bold text-gray-700 bg-gray-100 px-1.5 py-0.5 rounded">
                    {format!("{:.1}", rating)}
                </span>
            </Show>
        </div>
    }
}

/// Tailwind classes of a badge colour
pub fn badge_class(variant: &str) -> &'static str {
    match variant {
        "green" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-green-100 text-green-800 border border-green-200",
        "red" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-red-100 text-red-800 border border-red-200",
        "blue" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-blue-100 text-blue-800 border border-blue-200",
        "yellow" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-yellow-100 text-yellow-800 border border-yellow-200",
        _ => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-gray-100 text-gray-800 border border-gray-200",
    }
}

/// Badge component
///
/// A small badge/tag for displaying labels.
#[component]
pub fn Badge(
    children: Children,
    /// Badge color variant
    #[prop(default = "gray")]
    variant: &'static str,
) -> impl IntoView {
    view! {
        <span class=badge_class(variant)>
            {children()}
        </span>
    }
}

/// Labelled text input bound to a signal
#[component]
pub fn TextInput(
    /// The current value
    value: RwSignal<String>,
    #[prop(default = "")]
    label: &'static str,
    /// Placeholder text
    #[prop(default = "")]
    placeholder: &'static str,
    /// Input type (text, number, date, tel...)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Additional CSS classes
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_class = "w-full px-4 py-2 border border-gray-300 rounded-lg \
                      focus:ring-2 focus:ring-indigo-500 focus:border-transparent \
                      outline-none transition-shadow shadow-sm";

    view! {
        <label class="block space-y-1">
            {(!label.is_empty()).then(|| view! {
                <span class="text-sm font-medium text-gray-700">{label}</span>
            })}
            <input
                type=input_type
                placeholder=placeholder
                class=format!("{} {}", base_class, class)
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                }
            />
        </label>
    }
}

/// Select dropdown component
///
/// A styled select dropdown for string values.
#[component]
pub fn SelectString(
    /// The currently selected value
    value: RwSignal<String>,
    /// Available options as (value, label) pairs
    options: Vec<(String, String)>,
) -> impl IntoView {
    let class = "px-4 py-2 border border-gray-300 rounded-lg bg-white \
                 focus:ring-2 focus:ring-indigo-500 focus:border-transparent \
                 outline-none cursor-pointer shadow-sm";

    view! {
        <select
            class=class
            on:change=move |ev| {
                value.set(event_target_value(&ev));
            }
        >
            {options.into_iter().map(|(opt_value, label)| {
                let opt_val = opt_value.clone();
                view! {
                    <option
                        value=opt_value
                        selected=move || value.get() == opt_val
                    >
                        {label}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}

/// Rupee amount with two decimals
pub fn format_price(amount: Decimal) -> String {
    format!("₹{:.2}", amount.round_dp(2))
}

/// Price display component
#[component]
pub fn PriceDisplay(
    /// The price value
    price: Decimal,
    /// Whether to highlight (larger, bolder)
    #[prop(default = false)]
    highlight: bool,
) -> impl IntoView {
    let class = if highlight {
        "text-xl font-bold text-green-600"
    } else {
        "text-gray-900 font-medium"
    };

    view! {
        <span class=class>
            {format_price(price)}
        </span>
    }
}

/// Page title with an optional subtitle
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="mb-8">
            <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
            {subtitle.map(|s| view! { <p class="text-gray-500 mt-1">{s}</p> })}
        </div>
    }
}

/// Link with a single query parameter, e.g. `/sellerproducts?seller=...`
pub fn query_href(path: &str, key: &str, value: &str) -> String {
    format!("{path}?{key}={}", encode_query_value(value))
}

/// Percent-encode everything outside the unreserved URL characters
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
