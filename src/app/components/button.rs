use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    pub fn css_class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "c-button c-button--primary",
            ButtonVariant::Secondary => "c-button c-button--secondary",
            ButtonVariant::Danger => "c-button c-button--danger",
        }
    }
}

/// Styled button. While `busy` it is disabled and shows an ellipsis.
#[component]
pub fn Button(
    #[props(default)]
    variant: ButtonVariant,
    #[props(default = false)]
    disabled: bool,
    #[props(default = false)]
    busy: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: variant.css_class(),
            r#type: "button",
            disabled: disabled || busy,
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            if busy { "..." } else { {children} }
        }
    }
}
