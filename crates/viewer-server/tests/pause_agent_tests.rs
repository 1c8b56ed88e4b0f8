//! Behaviour tests for the runtime pause agent.
//!
//! Runs the agent script under `boa_engine` against a small scripted DOM:
//! timers and animation frames only fire when the test drives them with
//! `runTimers()` / `runFrames()`, and media elements count their calls.

use boa_engine::{Context, Source};
use html_viewer_core::traits::PauseSignal;
use html_viewer_server::agent::agent_source;
use serde_json::{Value, json};

const FAKE_DOM: &str = r"
var log = [];
var timers = [];
var frames = [];
var nextHandle = 1;
var listeners = {};

function addTimer(fn, interval) {
  var handle = nextHandle++;
  timers.push({ handle: handle, fn: fn, interval: interval, cancelled: false });
  return handle;
}

function cancelIn(list, handle) {
  for (var i = 0; i < list.length; i++) {
    if (list[i].handle === handle) list[i].cancelled = true;
  }
}

function runTimers() {
  var due = timers;
  timers = due.filter(function (t) { return t.interval && !t.cancelled; });
  for (var i = 0; i < due.length; i++) {
    if (!due[i].cancelled) due[i].fn();
  }
}

function runFrames() {
  var due = frames;
  frames = [];
  for (var i = 0; i < due.length; i++) {
    if (!due[i].cancelled) due[i].fn(16);
  }
}

function element(tag) {
  return {
    tagName: tag,
    id: '',
    textContent: '',
    parentNode: null,
    attributes: {},
    children: [],
    appendChild: function (child) {
      child.parentNode = this;
      this.children.push(child);
      return child;
    },
    removeChild: function (child) {
      this.children = this.children.filter(function (c) { return c !== child; });
      child.parentNode = null;
      return child;
    },
    setAttribute: function (name, value) { this.attributes[name] = String(value); },
    removeAttribute: function (name) { delete this.attributes[name]; }
  };
}

function media(playing) {
  return {
    paused: !playing,
    ended: false,
    plays: 0,
    pauses: 0,
    pause: function () { this.paused = true; this.pauses++; },
    play: function () { this.paused = false; this.plays++; return { catch: function () {} }; }
  };
}

function animation(state) {
  return {
    playState: state,
    plays: 0,
    pauses: 0,
    pause: function () { this.playState = 'paused'; this.pauses++; },
    play: function () { this.playState = 'running'; this.plays++; }
  };
}

var playing = media(true);
var stopped = media(false);
var spinner = animation('running');
var finished = animation('finished');

var root = element('html');
var head = root.appendChild(element('head'));

var document = {
  documentElement: root,
  head: head,
  createElement: element,
  getElementById: function (id) {
    for (var i = 0; i < head.children.length; i++) {
      if (head.children[i].id === id) return head.children[i];
    }
    return null;
  },
  querySelectorAll: function () { return [playing, stopped]; },
  getAnimations: function () { return [spinner, finished]; }
};

var window = {
  location: { pathname: '/__vfs__/index.html' },
  setTimeout: function (fn) { return addTimer(fn, false); },
  setInterval: function (fn) { return addTimer(fn, true); },
  clearTimeout: function (handle) { cancelIn(timers, handle); },
  clearInterval: function (handle) { cancelIn(timers, handle); },
  requestAnimationFrame: function (fn) {
    var handle = nextHandle++;
    frames.push({ handle: handle, fn: fn, cancelled: false });
    return handle;
  },
  cancelAnimationFrame: function (handle) { cancelIn(frames, handle); },
  addEventListener: function (type, fn) {
    (listeners[type] = listeners[type] || []).push(fn);
  }
};

function dispatchMessage(data) {
  var list = listeners.message || [];
  for (var i = 0; i < list.length; i++) list[i]({ data: data });
}

function freezeStyles() {
  return head.children.filter(function (c) { return c.id === '__html_viewer_pause_style__'; });
}

function pendingDeferred() {
  return window.__html_viewer_pause_agent__.pendingDeferred();
}
";

struct Page {
    context: Context,
}

impl Page {
    fn load() -> Self {
        let mut page = Self {
            context: Context::default(),
        };
        page.run(FAKE_DOM);
        page.run(agent_source());
        page
    }

    fn run(&mut self, script: &str) {
        self.context.eval(Source::from_bytes(script)).unwrap();
    }

    fn json(&mut self, expr: &str) -> Value {
        let script = format!("JSON.stringify({expr})");
        let value = self.context.eval(Source::from_bytes(&script)).unwrap();
        let text = value
            .to_string(&mut self.context)
            .unwrap()
            .to_std_string_escaped();
        serde_json::from_str(&text).unwrap()
    }

    fn signal(&mut self, paused: bool) {
        let message = serde_json::to_string(&PauseSignal::new(paused).to_message()).unwrap();
        self.run(&format!("dispatchMessage({message});"));
    }
}

#[test]
fn test_held_timers_flush_in_order_on_resume() {
    let mut page = Page::load();
    page.run(
        "window.setTimeout(function () { log.push('a'); }, 10);
         window.setTimeout(function () { log.push('b'); }, 20);
         window.setTimeout(function () { log.push('c'); }, 30);",
    );

    page.signal(true);
    page.run("runTimers(); window.setTimeout(function () { log.push('d'); }, 0); runTimers();");
    assert_eq!(page.json("log"), json!([]));

    page.signal(false);
    assert_eq!(page.json("log"), json!(["a", "b", "c"]));

    page.run("runTimers();");
    assert_eq!(page.json("log"), json!(["a", "b", "c", "d"]));
    assert_eq!(page.json("pendingDeferred()"), json!(0));
}

#[test]
fn test_animation_frames_wait_for_resume() {
    let mut page = Page::load();
    page.run("window.requestAnimationFrame(function () { log.push('early'); });");

    page.signal(true);
    page.run(
        "runFrames();
         window.requestAnimationFrame(function (t) { log.push('late:' + t); });
         runFrames();",
    );
    assert_eq!(page.json("log"), json!([]));

    page.signal(false);
    assert_eq!(page.json("log"), json!([]));

    page.run("runFrames();");
    assert_eq!(page.json("log"), json!(["early", "late:16"]));
    assert_eq!(page.json("pendingDeferred()"), json!(0));
}

#[test]
fn test_resume_restarts_only_previously_playing_media() {
    let mut page = Page::load();

    page.signal(true);
    assert_eq!(
        page.json("[playing.paused, playing.pauses, stopped.paused, stopped.pauses]"),
        json!([true, 1, true, 0])
    );
    assert_eq!(
        page.json("[spinner.playState, finished.pauses]"),
        json!(["paused", 0])
    );

    page.signal(false);
    assert_eq!(
        page.json("[playing.paused, playing.plays, stopped.paused, stopped.plays]"),
        json!([false, 1, true, 0])
    );
    assert_eq!(
        page.json("[spinner.playState, spinner.plays, finished.plays]"),
        json!(["running", 1, 0])
    );
}

#[test]
fn test_repeated_signals_are_idempotent() {
    let mut page = Page::load();

    page.signal(true);
    page.signal(true);
    assert_eq!(page.json("freezeStyles().length"), json!(1));
    assert_eq!(
        page.json("freezeStyles()[0].textContent.indexOf('animation-play-state:paused') >= 0"),
        json!(true)
    );
    assert_eq!(
        page.json("root.attributes['data-html-viewer-paused']"),
        json!("1")
    );
    assert_eq!(page.json("playing.pauses"), json!(1));

    page.signal(false);
    page.signal(false);
    assert_eq!(page.json("freezeStyles().length"), json!(0));
    assert_eq!(
        page.json("'data-html-viewer-paused' in root.attributes"),
        json!(false)
    );
    assert_eq!(page.json("playing.plays"), json!(1));
}

#[test]
fn test_cancelled_callbacks_never_run() {
    let mut page = Page::load();

    page.signal(true);
    page.run(
        "var t = window.setTimeout(function () { log.push('timeout'); }, 0);
         var f = window.requestAnimationFrame(function () { log.push('frame'); });
         window.clearTimeout(t);
         window.cancelAnimationFrame(f);",
    );
    assert_eq!(page.json("pendingDeferred()"), json!(0));

    page.signal(false);
    page.run("runTimers(); runFrames();");
    assert_eq!(page.json("log"), json!([]));
}

#[test]
fn test_deferred_interval_runs_until_cleared() {
    let mut page = Page::load();

    page.signal(true);
    page.run("var i = window.setInterval(function () { log.push('tick'); }, 100);");
    page.signal(false);

    page.run("runTimers(); runTimers();");
    assert_eq!(page.json("log"), json!(["tick", "tick"]));
    assert_eq!(page.json("pendingDeferred()"), json!(1));

    page.run("window.clearInterval(i); runTimers();");
    assert_eq!(page.json("log"), json!(["tick", "tick"]));
    assert_eq!(page.json("pendingDeferred()"), json!(0));
}

#[test]
fn test_agent_installs_once_and_ignores_foreign_messages() {
    let mut page = Page::load();
    page.run(agent_source());
    assert_eq!(page.json("listeners.message.length"), json!(1));

    page.run("dispatchMessage('not json'); dispatchMessage({ type: 'other', paused: true });");
    assert_eq!(page.json("freezeStyles().length"), json!(0));

    page.signal(true);
    assert_eq!(page.json("playing.pauses"), json!(1));
}
