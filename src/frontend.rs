use crate::config::{MotionConfig, SiteConfig};
use crate::content::{
    ArchiveEntry, Contact, FooterVariant, Identity, NavLink as NavItem, Project,
    SocialLink as SocialItem, ARCHIVE_PLACEHOLDER_IMAGE, PROJECT_PLACEHOLDER_IMAGE,
};
use crate::elements::{
    Decoration, HeaderChrome, HeaderFrame, HeroParallax, ParallaxDepth, ParallaxFrame,
    PressState, PressStyle, ProgressBar, Sink, TiltCard,
};
use crate::error::{MotionError, SiteError};
use crate::input::InputEvent;
use crate::presets;
use crate::runtime::{MotionElement, MotionRuntime, Mount};
use crate::sampler::{ElementRect, ViewportSize};
use crate::telemetry::{self, log_event, LogLevel};
use crate::timeline::{Easing, Property, Timeline};
use crate::transform::Transform;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Element, Event, EventTarget, MouseEvent};
use yew::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;
type ElementSlot<E> = Rc<RefCell<Option<Rc<RefCell<E>>>>>;

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn viewport_size() -> ViewportSize {
    let Some(win) = window() else {
        return ViewportSize::default();
    };
    let fallback = ViewportSize::default();

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(fallback.width);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(fallback.height);

    ViewportSize::new(width, height)
}

fn document_height() -> f64 {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0)
}

fn scroll_event() -> InputEvent {
    InputEvent::Scroll {
        offset: window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0),
        document_height: document_height(),
    }
}

fn write_style(node: &NodeRef, css: &str) {
    if let Some(element) = node.cast::<Element>() {
        let _ = element.set_attribute("style", css);
    }
}

fn style_sink(node: NodeRef) -> Sink<Transform> {
    Box::new(move |transform: &Transform| write_style(&node, &transform.to_css()))
}

fn preset(timeline: Result<Timeline, MotionError>) -> Option<Timeline> {
    match timeline {
        Ok(timeline) => Some(timeline),
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "timeline_rejected",
                json!({ "error": error.to_string() }),
            );
            None
        }
    }
}

fn fall_back_to(placeholder: &'static str) -> Callback<Event> {
    Callback::from(move |event: Event| {
        let Some(image) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if image.get_attribute("src").as_deref() != Some(placeholder) {
            let _ = image.set_attribute("src", placeholder);
        }
    })
}

#[derive(Default)]
struct FrameLoopState {
    handle: Option<i32>,
    callback: Option<FrameCallback>,
}

/// `requestAnimationFrame` loop that runs while any element is awake.
#[derive(Clone)]
struct FrameLoop {
    state: Rc<RefCell<FrameLoopState>>,
}

impl FrameLoop {
    fn new(runtime: MotionRuntime) -> Self {
        let state = Rc::new(RefCell::new(FrameLoopState::default()));
        let weak = Rc::downgrade(&state);

        let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.borrow_mut().handle = None;

            let report = runtime.tick(now);
            if runtime.needs_frame() {
                schedule_frame(&state);
            } else {
                runtime.reset_clock();
                log_event(
                    LogLevel::Debug,
                    "frame_loop_idle",
                    json!({ "frame": report.frame, "scheduled": runtime.scheduled_count() }),
                );
            }
        });
        state.borrow_mut().callback = Some(callback);

        Self { state }
    }

    fn request(&self) {
        if self.state.borrow().handle.is_none() {
            schedule_frame(&self.state);
        }
    }

    fn stop(&self) {
        let mut state = self.state.borrow_mut();
        if let (Some(handle), Some(win)) = (state.handle.take(), window()) {
            let _ = win.cancel_animation_frame(handle);
        }
        state.callback = None;
    }
}

fn schedule_frame(state: &Rc<RefCell<FrameLoopState>>) {
    let handle = {
        let state = state.borrow();
        let (Some(callback), Some(win)) = (state.callback.as_ref(), window()) else {
            return;
        };
        win.request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    };
    state.borrow_mut().handle = handle;
}

/// Page-wide motion context: the runtime plus the frame loop driving it.
#[derive(Clone)]
struct Motion {
    runtime: MotionRuntime,
    frames: FrameLoop,
}

impl PartialEq for Motion {
    fn eq(&self, other: &Self) -> bool {
        self.runtime == other.runtime
    }
}

impl Motion {
    fn new(config: &MotionConfig) -> Self {
        let reduced_motion = config.reduced_motion.resolve(prefers_reduced_motion());
        let runtime = MotionRuntime::new(viewport_size(), config.clone(), reduced_motion);
        runtime.prime([scroll_event()]);
        let frames = FrameLoop::new(runtime.clone());
        Self { runtime, frames }
    }

    fn config(&self) -> &MotionConfig {
        self.runtime.config()
    }

    fn reduced_motion(&self) -> bool {
        self.runtime.reduced_motion()
    }

    fn mount<E: MotionElement + 'static>(&self, element: Rc<RefCell<E>>) -> Mount {
        let mount = self.runtime.mount(element);
        self.frames.request();
        mount
    }

    fn dispatch(&self, event: InputEvent) {
        self.runtime.hub().dispatch(event);
        self.frames.request();
    }

    fn wake(&self) {
        self.runtime.wake();
        self.frames.request();
    }
}

/// An event listener removed from its target on drop.
struct WindowListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    fn attach(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn attach_input_listeners(motion: &Motion) -> Vec<WindowListener> {
    let Some(win) = window() else {
        return Vec::new();
    };
    let target: EventTarget = win.clone().into();
    let mut listeners = Vec::new();

    let on_move = {
        let motion = motion.clone();
        move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                motion.dispatch(InputEvent::PointerMove {
                    client_x: f64::from(mouse.client_x()),
                    client_y: f64::from(mouse.client_y()),
                });
            }
        }
    };
    listeners.extend(WindowListener::attach(&target, "mousemove", on_move));

    let on_scroll = {
        let motion = motion.clone();
        move |_: Event| motion.dispatch(scroll_event())
    };
    listeners.extend(WindowListener::attach(&target, "scroll", on_scroll));

    let on_resize = {
        let motion = motion.clone();
        move |_: Event| {
            let viewport = viewport_size();
            motion.dispatch(InputEvent::Resize {
                width: viewport.width,
                height: viewport.height,
            });
            motion.dispatch(scroll_event());
        }
    };
    listeners.extend(WindowListener::attach(&target, "resize", on_resize));

    if let Some(root) = win.document().and_then(|d| d.document_element()) {
        let root: EventTarget = root.into();
        let on_leave = {
            let motion = motion.clone();
            move |_: Event| motion.dispatch(InputEvent::PointerLeave)
        };
        listeners.extend(WindowListener::attach(&root, "mouseleave", on_leave));
    }

    listeners
}

/// Builds an element once the component's nodes exist and keeps it mounted
/// until the component unmounts.
#[hook]
fn use_motion_element<E, F>(build: F) -> ElementSlot<E>
where
    E: MotionElement + 'static,
    F: FnOnce(&Motion) -> Result<E, SiteError> + 'static,
{
    let motion = use_context::<Motion>();
    let slot: ElementSlot<E> = use_mut_ref(|| None);

    {
        let slot = slot.clone();
        use_effect_with((), move |_| {
            let mount = motion.as_ref().and_then(|motion| match build(motion) {
                Ok(element) => {
                    let element = Rc::new(RefCell::new(element));
                    *slot.borrow_mut() = Some(Rc::clone(&element));
                    Some(motion.mount(element))
                }
                Err(error) => {
                    log_event(
                        LogLevel::Warn,
                        "motion_element_rejected",
                        json!({ "error": error.to_string() }),
                    );
                    None
                }
            });

            move || {
                slot.borrow_mut().take();
                drop(mount);
            }
        });
    }

    slot
}

#[derive(Properties, PartialEq)]
struct DecorProps {
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    timeline: Option<Timeline>,
    #[prop_or_default]
    base: Option<Transform>,
    #[prop_or_default]
    inline: bool,
    #[prop_or_default]
    children: Html,
}

/// Plays a timeline on one node: looping ornaments and one-shot entrances.
#[function_component(Decor)]
fn decor(props: &DecorProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<Motion>();
    let timeline = props.timeline.clone().unwrap_or_default();
    let base = props.base.unwrap_or_default();

    let first_frame = if motion.as_ref().map_or(true, Motion::reduced_motion) {
        base.compose(&timeline.resting())
    } else {
        base.compose(&timeline.sample(0.0))
    };

    {
        let node = node.clone();
        use_motion_element(move |motion| {
            Ok(Decoration::new(timeline, motion.reduced_motion(), style_sink(node)).with_base(base))
        });
    }

    let style = first_frame.to_css();
    if props.inline {
        html! {
            <span ref={node} class={props.class.clone()} style={style}>{props.children.clone()}</span>
        }
    } else {
        html! {
            <div ref={node} class={props.class.clone()} style={style}>{props.children.clone()}</div>
        }
    }
}

#[derive(Properties, PartialEq)]
struct PressableProps {
    #[prop_or_default]
    href: Option<AttrValue>,
    #[prop_or_default]
    class: Classes,
    #[prop_or(PressStyle::BUTTON)]
    press: PressStyle,
    #[prop_or_default]
    new_tab: bool,
    #[prop_or_default]
    label: Option<AttrValue>,
    #[prop_or_default]
    children: Html,
}

/// A link or tile that springs on hover and press.
#[function_component(Pressable)]
fn pressable(props: &PressableProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<Motion>();
    let press = {
        let node = node.clone();
        let style = props.press;
        use_motion_element(move |motion| {
            Ok(PressState::new(
                style,
                motion.config().press_spring,
                motion.reduced_motion(),
                style_sink(node),
            )?)
        })
    };

    let update = |change: fn(&mut PressState)| {
        let press = press.clone();
        let motion = motion.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(state) = press.borrow().as_ref() {
                change(&mut state.borrow_mut());
            }
            if let Some(motion) = motion.as_ref() {
                motion.wake();
            }
        })
    };
    let onmouseenter = update(|state| state.set_hovered(true));
    let onmouseleave = update(|state| state.set_hovered(false));
    let onmousedown = update(|state| state.set_pressed(true));
    let onmouseup = update(|state| state.set_pressed(false));

    match props.href.clone() {
        Some(href) => html! {
            <a
                ref={node}
                class={props.class.clone()}
                href={href}
                target={props.new_tab.then_some("_blank")}
                rel={props.new_tab.then_some("noopener noreferrer")}
                aria-label={props.label.clone()}
                {onmouseenter}
                {onmouseleave}
                {onmousedown}
                {onmouseup}
            >
                {props.children.clone()}
            </a>
        },
        None => html! {
            <div
                ref={node}
                class={props.class.clone()}
                aria-label={props.label.clone()}
                {onmouseenter}
                {onmouseleave}
                {onmousedown}
                {onmouseup}
            >
                {props.children.clone()}
            </div>
        },
    }
}

#[function_component(ScrollProgress)]
fn scroll_progress() -> Html {
    let bar = use_node_ref();
    let glow = use_node_ref();

    {
        let bar = bar.clone();
        let glow = glow.clone();
        use_motion_element(move |motion| {
            let sink: Sink<Transform> = Box::new(move |transform: &Transform| {
                let css = transform.to_css();
                write_style(&bar, &css);
                write_style(&glow, &css);
            });
            Ok(ProgressBar::new(
                motion.config().progress_spring,
                motion.reduced_motion(),
                sink,
            )?)
        });
    }

    let empty = Transform {
        scale_x: 0.0,
        ..Transform::IDENTITY
    }
    .to_css();

    html! {
        <>
            <div ref={bar} class="scroll-progress" style={empty.clone()} aria-hidden="true" />
            <div ref={glow} class="scroll-progress-glow" style={empty} aria-hidden="true" />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    brand: AttrValue,
    nav: Vec<NavItem>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let node = use_node_ref();

    {
        let node = node.clone();
        use_motion_element(move |motion| {
            let sink: Sink<HeaderFrame> = Box::new(move |frame: &HeaderFrame| {
                if let Some(element) = node.cast::<Element>() {
                    let _ = element.set_attribute("style", &frame.to_css());
                    let _ = element.set_attribute("data-scrolled", &frame.scrolled.to_string());
                }
            });
            Ok(HeaderChrome::new(motion.config().header_scroll_threshold, sink)?)
        });
    }

    html! {
        <header ref={node} class="site-header" data-scrolled="false">
            <Decor class="site-header-inner" timeline={preset(presets::drop_in())}>
                <nav class="site-nav" aria-label="Primary">
                    <Pressable href={AttrValue::from("/")} class="logo" press={PressStyle::LOGO}>
                        {props.brand.clone()}
                        <span class="logo-underline" aria-hidden="true" />
                    </Pressable>
                    <ul class="nav-links">
                        { for props.nav.iter().map(|item| html! {
                            <NavLink href={item.href.clone()} label={item.label.clone()} />
                        }) }
                        <li>
                            <Pressable href={AttrValue::from("#connect")} class="nav-cta">
                                <span>{"Connect"}</span>
                            </Pressable>
                        </li>
                    </ul>
                </nav>
            </Decor>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    html! {
        <li>
            <a class="nav-link" href={props.href.clone()}>
                {props.label.clone()}
                <span class="nav-underline" aria-hidden="true" />
            </a>
        </li>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    identity: Identity,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let name = use_node_ref();
    let skills = use_node_ref();
    let large_blob = use_node_ref();
    let medium_blob = use_node_ref();
    let accent_blob = use_node_ref();
    let outer_ring = use_node_ref();
    let inner_ring = use_node_ref();
    let bottom_accent = use_node_ref();

    {
        let layers = vec![
            (ParallaxDepth::Heavy, name.clone()),
            (ParallaxDepth::Heavy, accent_blob.clone()),
            (ParallaxDepth::Light, skills.clone()),
            (ParallaxDepth::Light, medium_blob.clone()),
            (ParallaxDepth::Light, outer_ring.clone()),
            (ParallaxDepth::VeryLight, large_blob.clone()),
            (ParallaxDepth::VeryLight, inner_ring.clone()),
            (ParallaxDepth::VeryLight, bottom_accent.clone()),
        ];
        use_motion_element(move |motion| {
            let sink: Sink<ParallaxFrame> = Box::new(move |frame: &ParallaxFrame| {
                for (depth, node) in &layers {
                    write_style(node, &frame.layer(*depth).to_css());
                }
            });
            Ok(HeroParallax::new(
                motion.runtime.hub().snapshot().viewport,
                motion.config().pointer_spring,
                motion.reduced_motion(),
                sink,
            )?)
        });
    }

    let block = |index: usize| {
        preset(presets::entrance(
            20.0,
            0.6,
            presets::HERO_BLOCKS.delay_for(index),
            Easing::EaseOut,
        ))
    };
    let words = props.identity.headline_words();
    let word_timelines = presets::headline(words.len()).unwrap_or_default();

    html! {
        <div class="hero">
            <div ref={large_blob} class="hero-layer blob-large-anchor">
                <Decor class="blob blob-large" timeline={preset(presets::breathe(1.1, (0.3, 0.4), 8.0, 0.0))} />
            </div>
            <div ref={medium_blob} class="hero-layer blob-medium-anchor">
                <Decor class="blob blob-medium" timeline={preset(presets::breathe(1.15, (0.25, 0.35), 10.0, 1.0))} />
            </div>
            <div ref={accent_blob} class="hero-layer blob-accent-anchor">
                <Decor class="blob blob-accent" timeline={preset(presets::drift(1.2, (30.0, -30.0), 12.0, 2.0))} />
            </div>
            <div ref={outer_ring} class="hero-layer ring-outer-anchor">
                <Decor class="ring ring-outer" timeline={preset(presets::orbit(360.0, 20.0, 1.1, 6.0, 0.0))} />
            </div>
            <div ref={inner_ring} class="hero-layer ring-inner-anchor">
                <Decor class="ring ring-inner" timeline={preset(presets::orbit(-360.0, 15.0, 1.15, 7.0, 1.0))} />
            </div>
            <Decor class="mote mote-a" timeline={preset(presets::float(20.0, (0.3, 0.6), 4.0, 0.0))} />
            <Decor class="mote mote-b" timeline={preset(presets::float(15.0, (0.4, 0.7), 5.0, 1.0))} />

            <section class="hero-content">
                <Decor class="hero-dots" timeline={block(0)}>
                    <Decor class="dot" timeline={preset(presets::pulse(1.3, 2.0, 0.0))} />
                    <div class="hero-dots-line" />
                    <Decor class="dot dot-soft" timeline={preset(presets::pulse(1.3, 2.0, 0.5))} />
                </Decor>

                <Decor timeline={block(1)}>
                    <h2 ref={name} class="hero-name">{props.identity.name.clone()}</h2>
                </Decor>

                <Decor class="hero-brand" timeline={block(2)}>
                    <div class="rule-short" />
                    <span class="brand-mark">
                        <Decor inline={true} timeline={preset(presets::twinkle(0.5, 1.0, 3.0, 0.0))}>{"✦"}</Decor>
                        {props.identity.brand.clone()}
                    </span>
                    <div class="rule-short" />
                </Decor>

                <h1 class="hero-headline">
                    { for words.iter().zip(word_timelines).map(|(word, timeline)| html! {
                        <Decor inline={true} class="headline-word" timeline={Some(timeline)}>
                            {format!("{word}\u{a0}")}
                        </Decor>
                    }) }
                </h1>

                <Decor timeline={block(3)}>
                    <p ref={skills} class="hero-skills">{props.identity.skills.clone()}</p>
                </Decor>

                <Decor timeline={block(4)}>
                    <Pressable href={AttrValue::from("#work")} class="hero-cta">
                        <span>{"View My Work"}</span>
                        <Decor inline={true} class="cta-arrow" timeline={preset(presets::nudge(Property::TranslateX, 3.0, 1.5, 0.0))}>{"→"}</Decor>
                        <Decor class="shimmer" timeline={preset(presets::shimmer(160.0, 2.0, 1.0))} />
                    </Pressable>
                </Decor>

                <Decor class="scroll-cue" timeline={block(5)}>
                    <span class="scroll-cue-label">
                        <Decor inline={true} timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.0))}>{"·"}</Decor>
                        {"Scroll"}
                        <Decor inline={true} timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 1.0))}>{"·"}</Decor>
                    </span>
                    <Decor class="scroll-cue-line" timeline={preset(presets::nudge(Property::TranslateY, 8.0, 2.0, 0.0))} />
                </Decor>
            </section>

            <div class="hero-footer">
                <div ref={bottom_accent} class="hero-footer-row">
                    <Decor class="dot dot-tiny" timeline={preset(presets::pulse(1.5, 2.0, 0.0))} />
                    <div class="fade-line" />
                    <Decor class="dot dot-tiny" timeline={preset(presets::pulse(1.5, 2.0, 1.0))} />
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectGridProps {
    projects: Vec<Project>,
}

#[function_component(ProjectGrid)]
fn project_grid(props: &ProjectGridProps) -> Html {
    html! {
        <section id="work" class="projects">
            <div class="section-glow" aria-hidden="true" />
            <div class="section-inner">
                <div class="project-grid">
                    { for props.projects.iter().enumerate().map(|(index, project)| html! {
                        <ProjectCard key={project.title.clone()} index={index} project={project.clone()} />
                    }) }
                </div>
                <Decor class="dot-row" timeline={preset(presets::pop_in(0.8, 0.6, 0.4))}>
                    <Decor class="dot dot-large" timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.0))} />
                    <Decor class="dot dot-large dot-soft" timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.3))} />
                    <Decor class="dot dot-large dot-pale" timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.6))} />
                </Decor>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    index: usize,
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let card = use_node_ref();
    let motion = use_context::<Motion>();
    let tilt = {
        let card = card.clone();
        use_motion_element(move |motion| {
            Ok(TiltCard::new(
                motion.config().tilt_spring,
                motion.reduced_motion(),
                style_sink(card),
            )?)
        })
    };

    let onmousemove = {
        let tilt = tilt.clone();
        let card = card.clone();
        let motion = motion.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(element) = card.cast::<Element>() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            if let Some(tilt) = tilt.borrow().as_ref() {
                tilt.borrow_mut().pointer_move(
                    ElementRect {
                        left: rect.left(),
                        top: rect.top(),
                        width: rect.width(),
                        height: rect.height(),
                    },
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
            }
            if let Some(motion) = motion.as_ref() {
                motion.wake();
            }
        })
    };

    let onmouseleave = {
        let tilt = tilt.clone();
        let motion = motion.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(tilt) = tilt.borrow().as_ref() {
                tilt.borrow_mut().pointer_leave();
            }
            if let Some(motion) = motion.as_ref() {
                motion.wake();
            }
        })
    };

    let project = &props.project;
    let entrance = preset(presets::entrance(
        50.0,
        0.6,
        presets::PROJECT_CARDS.delay_for(props.index),
        Easing::EXPO_OUT,
    ));

    html! {
        <Decor class="project-slot" timeline={entrance}>
            <div ref={card} class="project-card" {onmousemove} {onmouseleave}>
                <a class="project-link" href={project.url.clone()} target="_blank" rel="noopener noreferrer">
                    <span class="corner corner-left" aria-hidden="true" />
                    <span class="corner corner-right" aria-hidden="true" />
                    <div class={classes!("project-media", (!project.has_image()).then_some("is-placeholder"))}>
                        <img
                            src={project.image().to_string()}
                            alt={project.title.clone()}
                            loading="lazy"
                            onerror={fall_back_to(PROJECT_PLACEHOLDER_IMAGE)}
                        />
                        <div class="project-media-fade" />
                        <div class="hover-dots" aria-hidden="true">
                            <Decor class="hover-dot" timeline={preset(presets::nudge(Property::TranslateY, -4.0, 1.5, 0.0))} />
                            <Decor class="hover-dot" timeline={preset(presets::nudge(Property::TranslateY, -4.0, 1.5, 0.2))} />
                            <Decor class="hover-dot" timeline={preset(presets::nudge(Property::TranslateY, -4.0, 1.5, 0.4))} />
                        </div>
                        <div class="project-arrow" aria-hidden="true">
                            <Decor inline={true} timeline={preset(presets::nudge(Property::Rotate, 5.0, 2.0, 0.0))}>{"↗"}</Decor>
                        </div>
                    </div>
                    <div class="project-body">
                        <span class="project-rule" aria-hidden="true" />
                        <h3 class="project-title">
                            {project.title.clone()}
                            <Decor inline={true} class="title-dot" timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.0))}>{"·"}</Decor>
                        </h3>
                        <p class="project-description">{project.description.clone()}</p>
                        <div class="tags">
                            { for project.tags.iter().map(|tag| html! {
                                <span class="tag">{tag.clone()}</span>
                            }) }
                        </div>
                    </div>
                    <div class="project-accent" aria-hidden="true" />
                </a>
            </div>
        </Decor>
    }
}

#[derive(Properties, PartialEq)]
struct ArchiveGridProps {
    entries: Vec<ArchiveEntry>,
}

#[function_component(ArchiveGrid)]
fn archive_grid(props: &ArchiveGridProps) -> Html {
    html! {
        <section id="archive" class="archive">
            <Decor class="mote mote-archive-a" timeline={preset(presets::float(15.0, (0.3, 0.6), 5.0, 0.0))} />
            <Decor class="mote mote-archive-b" timeline={preset(presets::float(20.0, (0.2, 0.5), 6.0, 1.0))} />
            <Decor class="mote mote-archive-c" timeline={preset(presets::float(12.0, (0.3, 0.7), 4.0, 2.0))} />

            <div class="section-inner">
                <Decor class="archive-header" timeline={preset(presets::entrance(30.0, 0.6, 0.0, Easing::EXPO_OUT))}>
                    <div class="eyebrow">
                        <Decor class="eyebrow-line" timeline={preset(presets::draw_line(0.8, 0.2))} />
                        <span class="eyebrow-label">
                            <Decor inline={true} timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 0.0))}>{"·"}</Decor>
                            {"Creative Vault"}
                            <Decor inline={true} timeline={preset(presets::twinkle(0.3, 1.0, 2.0, 1.0))}>{"·"}</Decor>
                        </span>
                    </div>
                    <h2 class="archive-title">
                        {"Archive"}
                        <Decor inline={true} class="archive-star" timeline={preset(presets::sparkle(15.0, 1.2, 3.0))}>{"✦"}</Decor>
                    </h2>
                    <p class="archive-blurb">
                        {"A curated stash of playful, bite-sized creations and experiments, snapshots of the creative process."}
                    </p>
                </Decor>

                <div class="archive-grid">
                    { for props.entries.iter().enumerate().map(|(index, entry)| html! {
                        <ArchiveItem key={entry.id.clone()} index={index} entry={entry.clone()} />
                    }) }
                </div>

                <Decor class="dot-row" timeline={preset(presets::pop_in(0.8, 0.6, 0.5))}>
                    <Decor class="dot dot-mist" timeline={preset(presets::beacon(1.3, 0.0))} />
                    <div class="fade-line" />
                    <Decor class="dot dot-soft" timeline={preset(presets::beacon(1.3, 0.5))} />
                    <div class="fade-line" />
                    <Decor class="dot" timeline={preset(presets::beacon(1.3, 1.0))} />
                </Decor>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ArchiveItemProps {
    index: usize,
    entry: ArchiveEntry,
}

#[function_component(ArchiveItem)]
fn archive_item(props: &ArchiveItemProps) -> Html {
    let wobble_node = use_node_ref();
    let motion = use_context::<Motion>();
    let wobble = {
        let node = wobble_node.clone();
        use_motion_element(move |motion| {
            let timeline = presets::wobble(2.0, 0.4)?;
            Ok(Decoration::new(timeline, motion.reduced_motion(), style_sink(node)).paused())
        })
    };

    let onmouseenter = Callback::from(move |_: MouseEvent| {
        if let Some(decoration) = wobble.borrow().as_ref() {
            decoration.borrow_mut().replay();
        }
        if let Some(motion) = motion.as_ref() {
            motion.wake();
        }
    });

    let entry = &props.entry;

    html! {
        <Decor class="archive-slot" timeline={preset(presets::tile_in(presets::ARCHIVE_TILES.delay_for(props.index)))}>
            <div ref={wobble_node} class="archive-wobble" {onmouseenter}>
                <Pressable class="archive-tile" press={PressStyle::TILE} label={AttrValue::from(entry.title.clone())}>
                    <img
                        class="archive-image"
                        src={entry.image().to_string()}
                        alt=""
                        loading="lazy"
                        onerror={fall_back_to(ARCHIVE_PLACEHOLDER_IMAGE)}
                    />
                    <div class="archive-watermark" aria-hidden="true">{entry.id.clone()}</div>
                    <div class="archive-overlay" aria-hidden="true" />
                    <div class="archive-caption"><p>{entry.title.clone()}</p></div>
                    <div class="archive-badge"><span>{entry.id.clone()}</span></div>
                    <div class="archive-corner" aria-hidden="true" />
                </Pressable>
            </div>
        </Decor>
    }
}

#[derive(Properties, PartialEq)]
struct FooterProps {
    variant: FooterVariant,
    identity: Identity,
    contact: Contact,
    socials: Vec<SocialItem>,
    year: u16,
}

#[function_component(Footer)]
fn footer(props: &FooterProps) -> Html {
    if props.variant == FooterVariant::Minimal {
        return html! {
            <footer class="footer-minimal">
                <p>{format!("{} // {}", props.identity.name, props.identity.role)}</p>
            </footer>
        };
    }

    let reveal = |delay: f64| preset(presets::entrance(20.0, 0.6, delay, Easing::EaseInOut));

    html! {
        <footer class="site-footer">
            <Decor class="mote mote-footer-a" timeline={preset(presets::float(15.0, (0.3, 0.6), 5.0, 0.0))} />
            <Decor class="mote mote-footer-b" timeline={preset(presets::float(20.0, (0.4, 0.7), 6.0, 1.0))} />

            <div class="footer-inner">
                <div id="connect" class="connect">
                    <Decor class="connect-intro" timeline={reveal(0.0)}>
                        <div class="ornament">
                            <Decor class="dot" timeline={preset(presets::beacon(1.3, 0.0))} />
                            <div class="fade-line" />
                            <Decor inline={true} class="ornament-star" timeline={preset(presets::twinkle(0.5, 1.0, 3.0, 0.0))}>{"✦"}</Decor>
                            <div class="fade-line" />
                            <Decor class="dot dot-soft" timeline={preset(presets::beacon(1.3, 1.0))} />
                        </div>
                        <h3 class="connect-heading">{props.contact.heading.clone()}</h3>
                        <p class="connect-blurb">{props.contact.blurb.clone()}</p>
                    </Decor>

                    <Decor class="socials" timeline={reveal(0.2)}>
                        { for props.socials.iter().map(|link| html! {
                            <SocialLink link={link.clone()} />
                        }) }
                    </Decor>

                    <Decor inline={true} timeline={preset(presets::pop_in(0.9, 0.6, 0.3))}>
                        <Pressable href={AttrValue::from(props.contact.mailto())} class="connect-cta">
                            <span>{props.contact.cta_label.clone()}</span>
                            <Decor inline={true} class="cta-arrow" timeline={preset(presets::nudge(Property::TranslateX, 3.0, 1.5, 0.0))}>{"→"}</Decor>
                            <Decor class="shimmer" timeline={preset(presets::shimmer(160.0, 2.0, 1.0))} />
                        </Pressable>
                    </Decor>
                </div>

                <div class="footer-divider">
                    <Decor class="dot dot-soft" timeline={preset(presets::pulse(1.3, 2.0, 0.0))} />
                    <div class="fade-line fade-line-wide" />
                    <Decor class="dot dot-soft" timeline={preset(presets::pulse(1.3, 2.0, 1.0))} />
                </div>

                <Decor class="footer-bottom" timeline={reveal(0.4)}>
                    <div class="copyright">
                        <Decor inline={true} timeline={preset(presets::twinkle(0.5, 1.0, 2.0, 0.0))}>{"·"}</Decor>
                        <span>{format!("© {} {}", props.year, props.identity.name)}</span>
                        <span class="wide-only">{"•"}</span>
                        <span class="wide-only">{props.identity.role.clone()}</span>
                        <Decor inline={true} timeline={preset(presets::twinkle(0.5, 1.0, 2.0, 1.0))}>{"·"}</Decor>
                    </div>
                    <div class="crafted">
                        <span>{"Crafted with"}</span>
                        <Decor inline={true} class="heart" timeline={preset(presets::pulse(1.2, 1.5, 0.0))}>{"♥"}</Decor>
                        <span>{"& Rust"}</span>
                    </div>
                </Decor>

                <div class="dot-row">
                    <Decor class="dot dot-large" timeline={preset(presets::beacon(1.2, 0.0))} />
                    <Decor class="dot dot-large dot-soft" timeline={preset(presets::beacon(1.2, 0.3))} />
                    <Decor class="dot dot-large dot-pale" timeline={preset(presets::beacon(1.2, 0.6))} />
                </div>

                <div class="footer-star">
                    <Decor inline={true} timeline={preset(presets::glint(10.0, (0.3, 0.6), 4.0))}>{"✦"}</Decor>
                </div>
            </div>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct SocialLinkProps {
    link: SocialItem,
}

#[function_component(SocialLink)]
fn social_link(props: &SocialLinkProps) -> Html {
    let link = &props.link;

    html! {
        <Pressable
            href={AttrValue::from(link.href.clone())}
            class="social-link"
            press={PressStyle::SOCIAL}
            new_tab={link.opens_new_tab()}
            label={AttrValue::from(link.label.clone())}
        >
            <span class="social-glyph" aria-hidden="true">{link.icon.glyph()}</span>
            <span class="social-corner" aria-hidden="true" />
        </Pressable>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    site: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let motion = {
        let config = props.site.motion.clone();
        use_memo((), move |_| Motion::new(&config))
    };

    {
        let motion = (*motion).clone();
        use_effect_with((), move |_| {
            let listeners = attach_input_listeners(&motion);
            let viewport = viewport_size();
            motion.dispatch(InputEvent::Resize {
                width: viewport.width,
                height: viewport.height,
            });
            motion.dispatch(scroll_event());

            log_event(
                LogLevel::Info,
                "motion_runtime_started",
                json!({
                    "reducedMotion": motion.reduced_motion(),
                    "windowListeners": listeners.len(),
                    "elements": motion.runtime.scheduled_count(),
                }),
            );

            move || {
                drop(listeners);
                motion.frames.stop();
                log_event(
                    LogLevel::Debug,
                    "motion_runtime_stopped",
                    json!({ "listeners": motion.runtime.listener_count() }),
                );
            }
        });
    }

    let content = &props.site.content;
    let year = content
        .copyright_year
        .unwrap_or_else(|| js_sys::Date::new_0().get_full_year() as u16);

    html! {
        <ContextProvider<Motion> context={(*motion).clone()}>
            <ScrollProgress />
            <Header brand={content.identity.short_name.clone()} nav={content.nav.clone()} />
            <main id="content">
                <Hero identity={content.identity.clone()} />
                <div class="section-rule" aria-hidden="true" />
                <ProjectGrid projects={content.projects.clone()} />
                <ArchiveGrid entries={content.archive.clone()} />
            </main>
            <Footer
                variant={content.footer}
                identity={content.identity.clone()}
                contact={content.contact.clone()}
                socials={content.socials.clone()}
                year={year}
            />
        </ContextProvider<Motion>>
    }
}

#[function_component(Fallback)]
fn fallback() -> Html {
    html! {
        <main class="fallback">
            <p>{"This page could not load its content."}</p>
        </main>
    }
}

pub fn run() {
    let site = SiteConfig::embedded();
    let level = site
        .as_ref()
        .map(|site| site.motion.log_level)
        .unwrap_or(LogLevel::Info);
    telemetry::init(level);

    let document = window().and_then(|w| w.document());
    let Some(root) = document
        .as_ref()
        .and_then(|d| d.get_element_by_id("app"))
    else {
        log_event(LogLevel::Warn, "mount_point_missing", json!({ "id": "app" }));
        return;
    };

    match site {
        Ok(site) => {
            if let Some(document) = document.as_ref() {
                document.set_title(site.content.identity.page_title());
            }
            log_event(
                LogLevel::Info,
                "site_loaded",
                json!({
                    "projects": site.content.projects.len(),
                    "archive": site.content.archive.len(),
                    "footer": format!("{:?}", site.content.footer),
                }),
            );
            yew::Renderer::<App>::with_root_and_props(root, AppProps { site: Rc::new(site) })
                .render();
        }
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "site_config_invalid",
                json!({ "error": error.to_string() }),
            );
            yew::Renderer::<Fallback>::with_root(root).render();
        }
    }
}
