//! Screen transition engine.
//!
//! Serializes every screen change into one animated sequence: fetch the
//! fragment, mount the new node with its entering class, mark the old node
//! exiting, commit the history entry, activate on the next animation
//! frame, and after the settle delay tear down the outgoing controllers
//! and remove the old node. The [`guide_core::Navigator`] guard drops any
//! request arriving while a transition is in flight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use guide_core::{Decision, NavIntent, Navigator, Screen, TransitionPlan};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::controllers::{self, ControllerContext, FeatureController};
use crate::{dom, fetch, history};

/// Settle delay matching the CSS transition duration, in milliseconds.
pub const SETTLE_MS: i32 = 300;

/// Shared handle the engine gives widgets so they can request screens.
#[derive(Clone)]
pub struct NavHandle {
    inner: Weak<RefCell<EngineInner>>,
}

impl NavHandle {
    /// Request a transition; dropped silently if the engine is gone.
    pub fn request(&self, screen: Screen, intent: NavIntent) {
        if let Some(inner) = self.inner.upgrade() {
            spawn_local(run_transition(inner, screen, intent, true));
        }
    }
}

impl std::fmt::Debug for NavHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavHandle").finish_non_exhaustive()
    }
}

/// The transition engine. Owns the screen container, the navigation state
/// and the active screen's controllers.
#[derive(Clone)]
pub struct Engine {
    inner: Rc<RefCell<EngineInner>>,
}

impl Engine {
    /// Create an engine over the screen container and optional tab bar.
    #[must_use]
    pub fn new(container: Element, tab_bar: Option<Element>) -> Self {
        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(EngineInner {
                navigator: Navigator::new(),
                container,
                tab_bar,
                current_node: None,
                controllers: Vec::new(),
                weak_self: weak.clone(),
            })
        });
        Self { inner }
    }

    /// A handle widgets can use to request screens.
    #[must_use]
    pub fn handle(&self) -> NavHandle {
        NavHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Request a transition. `push` decides whether a history entry is
    /// written; popstate and initial-load requests pass `false`.
    pub fn request(&self, screen: Screen, intent: NavIntent, push: bool) {
        spawn_local(run_transition(Rc::clone(&self.inner), screen, intent, push));
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

struct EngineInner {
    navigator: Navigator,
    container: Element,
    tab_bar: Option<Element>,
    current_node: Option<Element>,
    controllers: Vec<Box<dyn FeatureController>>,
    weak_self: Weak<RefCell<EngineInner>>,
}

async fn run_transition(
    inner: Rc<RefCell<EngineInner>>,
    screen: Screen,
    intent: NavIntent,
    push: bool,
) {
    let plan = {
        let mut engine = inner.borrow_mut();
        match engine.navigator.begin(screen.clone(), intent) {
            Decision::Begin(plan) => plan,
            Decision::AlreadyActive | Decision::Busy => return,
        }
    };

    let descriptor = screen.descriptor();
    tracing::debug!(?screen, path = %descriptor.fragment_path, "loading screen");

    let fragment = match fetch::fetch_fragment(&descriptor.fragment_path).await {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(%err, "screen fragment failed to load");
            let mut engine = inner.borrow_mut();
            engine.navigator.abort();
            engine.show_inline_error();
            return;
        }
    };

    let (old_node, old_controllers) = {
        let mut engine = inner.borrow_mut();
        match engine.mount_fragment(&screen, &plan, &fragment, push) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::error!(%err, "screen mount failed");
                engine.navigator.abort();
                return;
            }
        }
    };

    // Activate once the DOM insert has been committed, so the entering
    // class transitions instead of applying instantly.
    {
        let inner = Rc::clone(&inner);
        let screen = screen.clone();
        let _ = dom::on_next_frame(move || {
            inner.borrow_mut().activate(&screen);
        });
    }

    let _ = dom::sleep(SETTLE_MS).await;

    let mut engine = inner.borrow_mut();
    engine.finish(screen, old_node, old_controllers, &plan);
}

impl EngineInner {
    /// Insert the new screen node and mark the old one exiting. Returns
    /// the outgoing node and controllers for teardown at settle time.
    #[allow(clippy::type_complexity)]
    fn mount_fragment(
        &mut self,
        screen: &Screen,
        plan: &TransitionPlan,
        fragment: &str,
        push: bool,
    ) -> guide_core::GuideResult<(Option<Element>, Vec<Box<dyn FeatureController>>)> {
        let document = dom::document()?;
        let node = document
            .create_element("div")
            .map_err(|e| dom::js_err("create screen node", e))?;
        node.set_class_name("screen");
        node.set_id(screen.view_name());
        node.set_inner_html(fragment);
        node.class_list()
            .add_1(plan.enter.enter_class())
            .map_err(|e| dom::js_err("entering class", e))?;
        self.container
            .append_child(&node)
            .map_err(|e| dom::js_err("append screen node", e))?;

        let old_node = self.current_node.replace(node);
        if let Some(old) = &old_node {
            let _ = old.class_list().remove_1("active");
            let _ = old.class_list().add_1(plan.exit.exit_class());
        }
        let old_controllers = std::mem::take(&mut self.controllers);

        if push {
            if let Err(err) = history::push(screen) {
                tracing::warn!(%err, "history entry not written");
            }
        }

        Ok((old_node, old_controllers))
    }

    /// Activate the mounted node, highlight the tab and mount the screen's
    /// controllers.
    fn activate(&mut self, screen: &Screen) {
        let Some(node) = self.current_node.clone() else {
            return;
        };
        let _ = node.class_list().add_1("active");
        self.update_tabs(screen);

        let ctx = ControllerContext {
            screen: screen.clone(),
            root: node,
            nav: NavHandle {
                inner: self.weak_self.clone(),
            },
        };
        for kind in screen.descriptor().controllers {
            match controllers::mount(kind, &ctx) {
                Ok(controller) => self.controllers.push(controller),
                Err(err) => tracing::error!(?kind, %err, "controller failed to mount"),
            }
        }
    }

    /// Tear down the outgoing screen and commit the transition.
    fn finish(
        &mut self,
        screen: Screen,
        old_node: Option<Element>,
        mut old_controllers: Vec<Box<dyn FeatureController>>,
        plan: &TransitionPlan,
    ) {
        for controller in &mut old_controllers {
            controller.teardown();
        }
        drop(old_controllers);
        if let Some(old) = old_node {
            old.remove();
        }
        if let Some(node) = &self.current_node {
            let _ = node.class_list().remove_1(plan.enter.enter_class());
        }
        self.navigator.settle(screen);
    }

    /// Highlight the tab button matching the screen, if the screen has one.
    fn update_tabs(&self, screen: &Screen) {
        let Some(tab_bar) = &self.tab_bar else {
            return;
        };
        let Ok(buttons) = tab_bar.query_selector_all(".tab-button") else {
            return;
        };
        let active_slug = screen.tab_slug();
        for index in 0..buttons.length() {
            let Some(button) = buttons
                .item(index)
                .and_then(|n| n.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let matches = button.get_attribute("data-screen").as_deref() == active_slug;
            if matches {
                let _ = button.class_list().add_1("active");
            } else {
                let _ = button.class_list().remove_1("active");
            }
        }
    }

    /// Drop a transient error banner onto the screen that stays visible.
    fn show_inline_error(&self) {
        let Ok(document) = dom::document() else {
            return;
        };
        let Ok(banner) = document.create_element("div") else {
            return;
        };
        banner.set_class_name("content-error");
        banner.set_text_content(Some("Inhalt konnte nicht geladen werden."));
        let target = self.current_node.as_ref().unwrap_or(&self.container);
        let _ = target.append_child(&banner);
    }
}
