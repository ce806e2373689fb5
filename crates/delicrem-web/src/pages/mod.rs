//! Page components for the dashboard

pub mod home;
pub mod not_found;
pub mod orders;
pub mod products;
pub mod sales;
pub mod users;

use crate::controllers::PageController;
use futures::future::LocalBoxFuture;
use futures::lock::Mutex;
use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;
use std::fmt;
use std::rc::Rc;

/// Reactive handle to a page controller
///
/// Actions run one at a time on the controller; after each one the page
/// snapshot signal is refreshed so the view re-renders.
pub struct PageHandle<C: PageController + 'static> {
    controller: StoredValue<SendWrapper<Rc<Mutex<C>>>>,
    view: RwSignal<C::View>,
}

impl<C: PageController + 'static> Clone for PageHandle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: PageController + 'static> Copy for PageHandle<C> {}

impl<C: PageController + 'static> fmt::Debug for PageHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageHandle").finish_non_exhaustive()
    }
}

impl<C: PageController + 'static> PageHandle<C> {
    /// Take ownership of `controller` for the lifetime of the page
    pub fn new(controller: C) -> Self {
        let view = RwSignal::new(controller.view());
        Self {
            controller: StoredValue::new(SendWrapper::new(Rc::new(Mutex::new(controller)))),
            view,
        }
    }

    /// Current page snapshot
    pub const fn view(&self) -> RwSignal<C::View> {
        self.view
    }

    /// Run a synchronous action
    pub fn update(self, action: impl FnOnce(&mut C) + 'static) {
        let controller = self.controller.get_value();
        spawn_local(async move {
            let mut guard = controller.lock().await;
            action(&mut *guard);
            self.view.set(guard.view());
        });
    }

    /// Run an asynchronous action such as a fetch or a submit
    pub fn run<F>(self, action: F)
    where
        F: for<'a> FnOnce(&'a mut C) -> LocalBoxFuture<'a, ()> + 'static,
    {
        let controller = self.controller.get_value();
        spawn_local(async move {
            let mut guard = controller.lock().await;
            action(&mut *guard).await;
            self.view.set(guard.view());
        });
    }
}
