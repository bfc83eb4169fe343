//! Side effects outside the page: status updates, clipboard, share sheet, file download, new
//! windows and confirmation dialogs.

use gloo_utils::{document, window};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlDocument, HtmlTextAreaElement, Url};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("not supported")]
    Unsupported,
    #[error("cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

impl From<JsValue> for ExportError {
    fn from(value: JsValue) -> Self {
        ExportError::Failed(format!("{value:?}"))
    }
}

#[allow(async_fn_in_trait)]
#[allow(clippy::missing_errors_doc)]
pub trait Platform {
    /// Shows an intermediate status while a command is still running.
    fn progress(&self, status: &str);
    async fn write_clipboard(&self, text: &str) -> Result<(), ExportError>;
    /// Copies through a temporary text area for browsers without clipboard access.
    fn copy_fallback(&self, text: &str) -> Result<(), ExportError>;
    async fn share(&self, title: &str, text: &str) -> Result<(), ExportError>;
    fn download(&self, file_name: &str, text: &str) -> Result<(), ExportError>;
    fn open_url(&self, url: &str) -> Result<(), ExportError>;
    fn confirm(&self, message: &str) -> bool;
}

pub struct Browser {
    on_progress: Box<dyn Fn(&str)>,
}

impl Browser {
    pub fn new(on_progress: impl Fn(&str) + 'static) -> Self {
        Self {
            on_progress: Box::new(on_progress),
        }
    }
}

impl Platform for Browser {
    fn progress(&self, status: &str) {
        (self.on_progress)(status);
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ExportError> {
        let clipboard = Reflect::get(&window().navigator(), &JsValue::from_str("clipboard"))?;
        if clipboard.is_undefined() {
            return Err(ExportError::Unsupported);
        }
        let promise = call_method(&clipboard, "writeText", &[JsValue::from_str(text)])?;
        JsFuture::from(js_sys::Promise::from(promise)).await?;
        Ok(())
    }

    fn copy_fallback(&self, text: &str) -> Result<(), ExportError> {
        let document = document();
        let body = document
            .body()
            .ok_or_else(|| ExportError::Failed(String::from("document has no body")))?;
        let text_area = document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(JsValue::from)?;
        text_area.set_value(text);
        text_area.set_attribute("readonly", "")?;
        text_area.style().set_property("position", "fixed")?;
        text_area.style().set_property("top", "-1000px")?;
        body.append_child(&text_area)?;
        text_area.select();

        let copied = document
            .dyn_into::<HtmlDocument>()
            .map_err(JsValue::from)
            .and_then(|document| document.exec_command("copy"));
        text_area.remove();

        // `false` means the browser rejected the command and nothing was copied.
        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(ExportError::Failed(String::from("copy command rejected"))),
            Err(err) => Err(err.into()),
        }
    }

    async fn share(&self, title: &str, text: &str) -> Result<(), ExportError> {
        let navigator = window().navigator();
        if !Reflect::get(&navigator, &JsValue::from_str("share"))?.is_function() {
            return Err(ExportError::Unsupported);
        }
        let data = Object::new();
        Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(title))?;
        Reflect::set(&data, &JsValue::from_str("text"), &JsValue::from_str(text))?;
        let promise = call_method(&navigator, "share", &[data.into()])?;
        JsFuture::from(js_sys::Promise::from(promise))
            .await
            .map_err(|_| ExportError::Cancelled)?;
        Ok(())
    }

    fn download(&self, file_name: &str, text: &str) -> Result<(), ExportError> {
        let options = BlobPropertyBag::new();
        options.set_type("text/plain;charset=utf-8");
        let blob = Blob::new_with_str_sequence_and_options(
            &Array::of1(&JsValue::from_str(text)),
            &options,
        )?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let document = document();
        let anchor = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(JsValue::from)?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        if let Some(body) = document.body() {
            body.append_child(&anchor)?;
        }
        anchor.click();
        anchor.remove();

        Url::revoke_object_url(&url)?;
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<(), ExportError> {
        window().open_with_url_and_target(url, "_blank")?;
        Ok(())
    }

    fn confirm(&self, message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()?;
    method.apply(target, &args.iter().collect::<Array>())
}
