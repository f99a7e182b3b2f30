//! Headless navbar driver.
//!
//! Usage: `navstrip [config.ron] [theme.ron]`
//!
//! Builds a page with one section per configured label, mounts the navbar,
//! activates every section block in turn and logs the scroll animation.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use navstrip::dom::Size;
use navstrip::loading;
use navstrip::navbar::{Mountable, Navbar};
use navstrip::page::Page;

/// Height of each generated page section in pixels.
const SECTION_HEIGHT: f32 = 1500.0;

/// Simulated frame interval.
const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        args[1].clone()
    } else {
        "data/navbar.ron".to_string()
    };
    let theme_path = if args.len() > 2 {
        args[2].clone()
    } else {
        "data/theme.ron".to_string()
    };

    let theme = loading::load_theme(&theme_path);
    let config = match loading::load_navbar_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let activated: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let log_target = Rc::clone(&activated);
    let config = config.on_section_click(move |id| log_target.borrow_mut().push(id.to_string()));

    let mut page = Page::with_metrics(Size::new(1280.0, 800.0), theme.metrics);
    let mut navbar = Navbar::new(config, &mut page.doc, &theme);
    for section in navbar.options().sections.clone() {
        page.add_section(&section, SECTION_HEIGHT);
    }
    if !navbar.create(&mut page.doc) {
        log::error!("navbar failed to mount");
        std::process::exit(1);
    }
    page.layout();

    println!(
        "{:?}: {} sections, page height {}",
        navbar.options().title,
        navbar.options().sections.len(),
        page.max_scroll() + page.viewport().height
    );

    let mut now = Instant::now();
    for section in navbar.options().sections.clone() {
        let Some(block) = navbar.section_block(&page.doc, &section) else {
            log::warn!("no block for section {section}");
            continue;
        };
        let Some(event) = page.click(block) else {
            continue;
        };
        navbar.handle_event(&mut page, event, now);

        let mut frames = 0;
        while page.tick(now) {
            log::debug!("frame {frames}: scroll_top {:.1}", page.scroll_top());
            now += FRAME;
            frames += 1;
        }
        println!(
            "{section:>12} -> scroll_top {:>8.1} after {frames} frames",
            page.scroll_top()
        );
    }

    println!("callbacks: {:?}", activated.borrow());
}
