//! UI Components

use leptos::prelude::*;
use lead_core::schema::OptionDescriptor;

/// Button color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Dark,
    Pink,
    Blue,
}

/// Arrow decoration on a button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Forward,
    Reversed,
}

/// Visual options of a `Button`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonStyle {
    pub color_scheme: ColorScheme,
    pub rounded: bool,
    pub arrow: Option<Arrow>,
    pub fancy: bool,
}

impl ButtonStyle {
    /// Class list for the current disabled state
    pub fn classes(&self, disabled: bool) -> String {
        let color = match (self.color_scheme, self.fancy) {
            (ColorScheme::Dark, _) => "text-white bg-black",
            (ColorScheme::Pink, _) => "text-white bg-[#FF73E3]",
            (ColorScheme::Blue, false) => "text-white bg-[#209BF1]",
            (ColorScheme::Blue, true) => {
                "text-white bg-[#209BF1] shadow-[6px_6px_0px_rgba(32,_155,_241,_0.25)] transition-all delay-150 ease-slick active:shadow-[3px_3px_0px_rgba(32,_155,_241,_0.25)] active:scale-[97]"
            }
        };

        let mut classes = vec!["flex justify-center gap-[10px]", color];

        if disabled {
            classes.push("opacity-25 cursor-not-allowed animate-disabled transition-none");
        }

        classes.push(if self.rounded { "rounded-full" } else { "rounded-[7px]" });

        match (self.arrow, self.fancy) {
            (Some(Arrow::Forward), false) => classes.push("after:content-[\"\\2192\"]"),
            (Some(Arrow::Forward), true) => classes.push(
                "after:content-[url(\"/fancy_arrow.svg\")] after:pl-1 after:max-h-6 after:h-full after:m-auto after:flex",
            ),
            (Some(Arrow::Reversed), false) => {
                classes.push("before:content-[\"\\2192\"] before:rotate-180");
            }
            (Some(Arrow::Reversed), true) => classes.push(
                "before:content-[url(\"/fancy_arrow.svg\")] before:pr-1 before:max-h-6 before:h-full before:m-auto before:flex before:rotate-180",
            ),
            (None, _) => {}
        }

        // hover nudge only while the arrow is clickable
        match self.arrow {
            Some(Arrow::Forward) if !disabled => classes.push(
                "after:transition-all after:ease-slick after:-translate-x-[2px] hover:after:translate-x-[2px]",
            ),
            Some(Arrow::Reversed) if !disabled => classes.push(
                "before:transition-all before:ease-slick before:translate-x-[2px] hover:before:-translate-x-[2px]",
            ),
            _ => {}
        }

        if self.fancy && self.color_scheme != ColorScheme::Blue {
            classes.push(
                "font-semibold delay-150 transition-all ease-slick font-heading shadow-[6px_6px_0px_rgba(0,_0,_0,_0.25)] active:scale-[97] active:shadow-[3px_3px_0px_rgba(0,_0,_0,_0.15)]",
            );
        }

        classes.join(" ")
    }
}

/// Styled button, optionally wrapped in a link
#[component]
pub fn Button(
    #[prop(optional)] style: ButtonStyle,
    #[prop(into, optional)] class: String,
    #[prop(default = "button")] button_type: &'static str,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, optional)] href: Option<String>,
    #[prop(into, optional)] target: Option<String>,
    #[prop(into, optional)] rel: Option<String>,
    children: Children,
) -> impl IntoView {
    let button = view! {
        <button
            type=button_type
            class=move || format!("{} {}", style.classes(disabled.get()), class)
            disabled=move || disabled.get()
        >
            {children()}
        </button>
    };

    match href {
        Some(href) => view! {
            <a href=href target=target rel=rel class="w-fit">
                {button}
            </a>
        }
        .into_any(),
        None => button.into_any(),
    }
}

const CHIP_CLASSES: &str = "w-full max-w-fit inline-flex items-center justify-center h-8 border rounded border-[#E7E7ED] whitespace-nowrap align-middle box-border text-lg cursor-pointer mr-4 mt-2 hover:bg-[#E7E7ED] active:bg-gray-300";

/// Class list for one chip token
pub fn chip_classes(selected: bool) -> String {
    let background = if selected { "bg-[#E7E7ED]" } else { "bg-white" };
    format!("{CHIP_CLASSES} {background}")
}

/// Bounded multi-select rendered as clickable tokens
#[component]
pub fn ChipList(
    chip_type: String,
    chips: Vec<OptionDescriptor>,
    #[prop(into)] selected: Signal<Vec<String>>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="mt-2">
            {chips
                .into_iter()
                .filter(|chip| !chip.hidden)
                .map(|chip| {
                    let value = chip.value;
                    let key = format!("{chip_type}-chip-{value}");
                    let selected_value = value.clone();
                    let is_selected = move || selected.with(|s| s.contains(&selected_value));
                    let click_value = value.clone();

                    view! {
                        <div
                            id=value
                            data-key=key
                            class=move || chip_classes(is_selected())
                            on:click=move |_| on_toggle.run(click_value.clone())
                        >
                            <span class="overflow-hidden overflow-ellipsis py-2 px-4 whitespace-nowrap">
                                {chip.label}
                            </span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_disabled_classes() {
        let style = ButtonStyle {
            color_scheme: ColorScheme::Pink,
            ..Default::default()
        };

        let enabled = style.classes(false);
        assert!(enabled.contains("bg-[#FF73E3]"));
        assert!(enabled.contains("rounded-[7px]"));
        assert!(!enabled.contains("cursor-not-allowed"));

        assert!(style.classes(true).contains("cursor-not-allowed"));
    }

    #[test]
    fn test_button_arrow_nudge_only_when_enabled() {
        let style = ButtonStyle {
            arrow: Some(Arrow::Forward),
            rounded: true,
            ..Default::default()
        };

        assert!(style.classes(false).contains("hover:after:translate-x-[2px]"));
        assert!(!style.classes(true).contains("hover:after:translate-x-[2px]"));
        assert!(style.classes(true).contains("rounded-full"));
    }

    #[test]
    fn test_chip_selected_background() {
        assert!(chip_classes(true).ends_with("bg-[#E7E7ED]"));
        assert!(chip_classes(false).ends_with("bg-white"));
    }
}
