use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo_net::http::Request;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::{self, messages};
use crate::dom;
use crate::error::{FieldError, LeadError};
use crate::toast::{Toast, ToastKind};

/// Raw contact form values. `None` means the field is not on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn is_blank(value: &Option<String>) -> bool {
    matches!(value, Some(v) if v.trim().is_empty())
}

impl LeadFields {
    /// Name first, then phone. Email and message are optional.
    pub fn validate(&self) -> Result<LeadRequest, FieldError> {
        if is_blank(&self.name) {
            return Err(FieldError::MissingName);
        }
        if is_blank(&self.phone) {
            return Err(FieldError::MissingPhone);
        }
        Ok(LeadRequest {
            name: trimmed(&self.name),
            phone: trimmed(&self.phone),
            email: trimmed(&self.email),
            message: trimmed(&self.message),
        })
    }
}

/// Decides whether a decoded reply counts as accepted.
pub fn check_reply(status_ok: bool, body: LeadResponse) -> Result<(), LeadError> {
    if status_ok && body.ok {
        Ok(())
    } else {
        Err(LeadError::Rejected(body.error))
    }
}

/// Toast text for a finished submission.
pub fn outcome_toast(result: &Result<(), LeadError>) -> (ToastKind, String) {
    match result {
        Ok(()) => (ToastKind::Success, messages::LEAD_SENT.to_string()),
        Err(LeadError::Rejected(reason)) => {
            let text = reason
                .as_deref()
                .filter(|reason| !reason.is_empty())
                .unwrap_or(messages::LEAD_FAILED);
            (ToastKind::Error, text.to_string())
        }
        Err(LeadError::Transport(_)) => (ToastKind::Error, messages::NETWORK_ERROR.to_string()),
    }
}

pub async fn send_lead(request: &LeadRequest) -> Result<(), LeadError> {
    let response = Request::post(&config::lead_endpoint())
        .json(request)?
        .send()
        .await?;
    let status_ok = response.ok();
    if !status_ok {
        debug!("Lead endpoint answered with status {}", response.status());
    }
    let body = response.json::<LeadResponse>().await?;
    check_reply(status_ok, body)
}

pub type LeadFuture = Pin<Box<dyn Future<Output = Result<(), LeadError>>>>;

/// Delivers a validated lead somewhere.
pub trait LeadSender {
    fn send(&self, request: LeadRequest) -> LeadFuture;
}

/// Posts leads to the site's backend.
pub struct HttpLeadSender;

impl LeadSender for HttpLeadSender {
    fn send(&self, request: LeadRequest) -> LeadFuture {
        Box::pin(async move { send_lead(&request).await })
    }
}

/// Marks the submit button busy and undoes it on drop, whatever the outcome.
struct BusyGuard {
    button: Option<HtmlButtonElement>,
}

impl BusyGuard {
    fn engage(button: Option<HtmlButtonElement>) -> Self {
        if let Some(button) = &button {
            button.set_disabled(true);
            let _ = button.set_attribute("aria-busy", "true");
        }
        Self { button }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(button) = &self.button {
            button.set_disabled(false);
            let _ = button.remove_attribute("aria-busy");
        }
    }
}

fn field_value(field: &Element) -> Option<String> {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    field.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
}

struct ContactForm {
    form: HtmlFormElement,
    toast: Rc<Toast>,
    sender: Rc<dyn LeadSender>,
}

impl ContactForm {
    fn field(&self, id: &str) -> Option<Element> {
        dom::find(&self.form, &format!("#{}", id))
    }

    fn read(&self) -> LeadFields {
        let value = |id: &str| self.field(id).and_then(|field| field_value(&field));
        LeadFields {
            name: value("name"),
            phone: value("phone"),
            email: value("email"),
            message: value("message"),
        }
    }

    fn submit(self: &Rc<Self>) {
        let request = match self.read().validate() {
            Ok(request) => request,
            Err(e) => {
                let field = match e {
                    FieldError::MissingName => "name",
                    FieldError::MissingPhone => "phone",
                };
                if let Some(field) = self.field(field) {
                    dom::focus(&field);
                }
                self.toast.show(&e.to_string(), ToastKind::Error);
                return;
            }
        };

        let button = dom::find(&self.form, "button[type=\"submit\"]")
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok());
        let busy = BusyGuard::engage(button);

        let contact = Rc::clone(self);
        spawn_local(async move {
            let _busy = busy;
            let result = contact.sender.send(request).await;
            match &result {
                Ok(()) => info!("Lead accepted"),
                Err(e) => warn!("{}", e),
            }

            let (kind, text) = outcome_toast(&result);
            contact.toast.show(&text, kind);
            if result.is_ok() {
                contact.form.reset();
            }
        });
    }
}

pub fn init(toast: Rc<Toast>) {
    let Some(form) = dom::by_id("contact-form")
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("No contact form on page");
        return;
    };
    bind(form, toast, Rc::new(HttpLeadSender));
}

pub fn bind(form: HtmlFormElement, toast: Rc<Toast>, sender: Rc<dyn LeadSender>) {
    let contact = Rc::new(ContactForm {
        form: form.clone(),
        toast,
        sender,
    });
    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        contact.submit();
    });
    info!("Contact form ready");
}
