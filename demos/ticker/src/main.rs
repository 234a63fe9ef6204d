//! Drives a `market.onQuote` subscription through a few recompositions:
//! waiting for a symbol, new closures on every pass, a symbol change, a pause,
//! and finally unmount. Run with `RUST_LOG=debug` to watch streams open and close.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tributary::{
    Input, SKIP, SubscriptionHandlers, SubscriptionOptions, Transport, Unsubscribable,
    subscription_options, use_subscription,
};
use tributary_core::{Composition, Dispose};

#[derive(Serialize, Deserialize)]
struct QuoteInput {
    symbol: String,
}

#[derive(Clone, Debug)]
struct Quote {
    symbol: String,
    price: f64,
}

struct Feed {
    symbol: String,
    handlers: SubscriptionHandlers<Quote, String>,
    closing: Rc<Cell<bool>>,
}

/// Pretend network client. Closing takes effect one pump late, the way a
/// real socket keeps delivering what was already on the wire.
#[derive(Default)]
struct SimulatedTransport {
    feeds: RefCell<Vec<Feed>>,
    tick: Cell<u32>,
}

impl SimulatedTransport {
    fn pump(&self) {
        let tick = self.tick.get() + 1;
        self.tick.set(tick);

        let feeds = std::mem::take(&mut *self.feeds.borrow_mut());
        let mut alive = Vec::with_capacity(feeds.len());
        for feed in feeds {
            let price = 100.0 + f64::from(tick) * 0.25;
            if feed.symbol == "HALT" {
                feed.handlers.emit_error(format!("{} is halted", feed.symbol));
            } else {
                feed.handlers.emit_data(Quote {
                    symbol: feed.symbol.clone(),
                    price,
                });
            }
            if !feed.closing.get() {
                alive.push(feed);
            }
        }
        self.feeds.borrow_mut().extend(alive);
    }
}

impl Transport<Quote, String> for SimulatedTransport {
    fn subscription(
        &self,
        path: &str,
        input: Option<&Value>,
        handlers: SubscriptionHandlers<Quote, String>,
    ) -> tributary::Result<Box<dyn Unsubscribable>> {
        let input: QuoteInput = input
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| tributary::SubscribeError::transport(path, "symbol required"))?;

        log::info!("transport: open {path} for {}", input.symbol);
        handlers.emit_started();

        let closing = Rc::new(Cell::new(false));
        self.feeds.borrow_mut().push(Feed {
            symbol: input.symbol,
            handlers,
            closing: closing.clone(),
        });
        Ok(Box::new(Dispose::new(move || closing.set(true))))
    }
}

type Log = Rc<RefCell<Vec<String>>>;

/// One pass of the quote view. Builds fresh closures every time.
fn quote_view(
    composition: &Composition,
    transport: &Rc<SimulatedTransport>,
    symbol: Option<&str>,
    paused: bool,
    log: &Log,
) -> anyhow::Result<()> {
    let pass = composition.passes() + 1;
    composition.compose(|| -> anyhow::Result<()> {
        let input = match symbol {
            Some(symbol) => Input::from_serialize(&QuoteInput {
                symbol: symbol.to_owned(),
            })?,
            None => SKIP,
        };

        let opts = {
            let (on_data, on_started, on_error) = (log.clone(), log.clone(), log.clone());
            SubscriptionOptions::new(move |q: Quote| {
                on_data
                    .borrow_mut()
                    .push(format!("[pass {pass}] {} @ {:.2}", q.symbol, q.price))
            })
            .on_started(move || on_started.borrow_mut().push(format!("[pass {pass}] started")))
            .on_error(move |e: String| on_error.borrow_mut().push(format!("[pass {pass}] error: {e}")))
        };
        let opts = if paused { opts.enabled(false) } else { opts };

        let descriptor = subscription_options(transport.clone(), ["market", "onQuote"], input, opts);
        use_subscription(&descriptor)
            .with_context(|| format!("binding {}", descriptor.meta().path))
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let transport = Rc::new(SimulatedTransport::default());
    let composition = Composition::new();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    // Symbol not chosen yet: nothing opens.
    quote_view(&composition, &transport, None, false, &log)?;
    transport.pump();

    // Same symbol across passes: one stream, latest closures receive.
    quote_view(&composition, &transport, Some("ACME"), false, &log)?;
    transport.pump();
    quote_view(&composition, &transport, Some("ACME"), false, &log)?;
    transport.pump();

    // Symbol change: the ACME feed still delivers once, but nobody hears it.
    quote_view(&composition, &transport, Some("INIT"), false, &log)?;
    transport.pump();

    quote_view(&composition, &transport, Some("HALT"), false, &log)?;
    transport.pump();

    quote_view(&composition, &transport, Some("HALT"), true, &log)?;
    transport.pump();

    composition.dispose();
    transport.pump();

    for line in log.borrow().iter() {
        println!("{line}");
    }
    Ok(())
}
