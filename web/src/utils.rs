use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Values persisted in `localStorage` under a fixed key.
pub(crate) trait StorageKey: Sized {
    const KEY: &'static str;

    fn local_load() -> Option<Self>
    where
        Self: DeserializeOwned,
    {
        LocalStorage::get(Self::KEY).ok()
    }

    fn local_or_default() -> Self
    where
        Self: DeserializeOwned + Default,
    {
        Self::local_load().unwrap_or_default()
    }

    fn local_save(&self)
    where
        Self: Serialize,
    {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("failed to save {}: {:?}", Self::KEY, err);
        }
    }

    fn local_delete() {
        LocalStorage::delete(Self::KEY);
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Numbers are used as-is, anything else is hashed (FNV-1a) so any text can name a maze.
///
/// The hash is fixed here instead of using `core::hash`, whose output may change between Rust releases. Seeds put in
/// links must keep producing the same maze across builds.
pub(crate) fn seed_from_str(seed: &str) -> u64 {
    let seed = seed.trim();
    seed.parse().unwrap_or_else(|_| {
        seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    })
}

/// Restarts and plays an `<audio>` element from the page, failures only get logged.
pub(crate) fn play_sound(element_id: &str) {
    let Some(element) = gloo::utils::document().get_element_by_id(element_id) else {
        log::warn!("no audio element with id={:?}", element_id);
        return;
    };
    let Ok(audio) = element.dyn_into::<web_sys::HtmlAudioElement>() else {
        log::warn!("element id={:?} is not an <audio>", element_id);
        return;
    };

    audio.set_current_time(0.0);
    if let Err(err) = audio.play() {
        log::error!("failed to play sound: {:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_seeds_are_used_directly() {
        assert_eq!(seed_from_str("42"), 42);
        assert_eq!(seed_from_str(" 7 "), 7);
    }

    #[test]
    fn text_seeds_hash_stably() {
        assert_eq!(seed_from_str("cheese"), seed_from_str("cheese"));
        assert_ne!(seed_from_str("cheese"), seed_from_str("mouse"));
        assert_eq!(seed_from_str(""), 0xcbf2_9ce4_8422_2325);
    }
}
