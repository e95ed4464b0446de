// src/site.rs
//! The bundled demo document: a portfolio page with a header bar, a menu and
//! a column of project cards.

use anyhow::Result;
use tracing::debug;

use rectweb_core::{Dimension, Expression, Flow, VIEWPORT_WIDTH};
use rectweb_layout::Application;

const HEADER_HEIGHT: f64 = 60.0;
const IMAGE_SIZE: f64 = 200.0;
const PROJECT_DISTANCE: f64 = 50.0;
const CONTENT_WIDTH: f64 = 748.0;

const FOREGROUND: [f64; 3] = [248.0, 248.0, 242.0];

pub struct Project {
    pub title: &'static str,
    pub href: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "cas2wavJS",
        href: "cas2wav",
        summary: "A browser-based converter from CAS files to WAV audio for playback on an MSX computer.",
        image: "files/cas2wavjs.png",
    },
    Project {
        title: "Vectron",
        href: "https://studiostok.itch.io/vectron",
        summary: "A rhythmic electronic experience where every visual is sound traced by a simulated XY oscilloscope.",
        image: "files/vectron_start_screen.png",
    },
    Project {
        title: "NTCD",
        href: "https://github.com/Grieverheart/ntcd",
        summary: "A single file collision detection and raycasting library for arbitrary convex shapes built on GJK.",
        image: "files/anim.gif",
    },
    Project {
        title: "INIP",
        href: "https://bitbucket.org/Grieverheart/ini_parser",
        summary: "A small ini-like file parser written in C, handy for setting up simulation parameters.",
        image: "files/inip.png",
    },
];

/// Hand-written rules appended after the generated stylesheet.
pub const EXTRA_STYLESHEET: &str = "\
:link {
    color: #47e3ff;
    text-decoration: none;
}

:visited {
    color: #ff8347;
}

#home_button:hover, #menu a:hover {
    color: #47e3ff;
}

.project_text > h2 {
    margin-top: 0;
}
";

pub fn build(app: &mut Application) -> Result<()> {
    app.set_metadata("<link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css?family=Roboto\">");

    let mut main = app.rectangle("main")?;
    main.node_mut().set_layout(Flow::Column);
    header(&mut main)?;
    main_content(&mut main)?;
    footer(&mut main)?;
    Ok(())
}

fn header(app: &mut Application) -> Result<()> {
    let mut header = app.rectangle("header")?;
    header
        .node_mut()
        .set_size(VIEWPORT_WIDTH, HEADER_HEIGHT)
        .set_fill_color(&[39.0, 40.0, 34.0])
        .set_font("Roboto")
        .set_font_size(17.0)
        .set_layout(Flow::Row);

    header.fixed_spacer(10)?;
    {
        let mut home_rect = header.rectangle("home_button_rect")?;
        home_rect.node_mut().set_layout(Flow::Column);
        home_rect.spacer()?;
        {
            let mut home = home_rect.rectangle("home_button")?;
            home.node_mut()
                .set_link("index.html")
                .set_text("NICK TASIOS")
                .set_text_color(&FOREGROUND)
                .set_font_size(34.0)
                .set_style("text-decoration", "none");
        }
        home_rect.spacer()?;
    }
    header.spacer()?;
    {
        let mut menu_rect = header.rectangle("menu_rect")?;
        menu_rect.node_mut().set_layout(Flow::Column);
        menu_rect.spacer()?;
        {
            let mut menu = menu_rect.rectangle("menu")?;
            menu.node_mut().set_layout(Flow::Row);
            for (name, text, href) in [
                ("menu_projects", "Projects", "projects/"),
                ("menu_blog", "Blog", "posts/"),
                ("menu_about", "About", "about/"),
            ] {
                {
                    let mut item = menu.rectangle(name)?;
                    item.node_mut()
                        .set_link(href)
                        .set_text(text)
                        .set_text_color(&FOREGROUND)
                        .set_style("text-decoration", "none");
                }
                menu.fixed_spacer(30)?;
            }
        }
        menu_rect.spacer()?;
    }
    Ok(())
}

fn main_content(app: &mut Application) -> Result<()> {
    let mut content_rect = app.rectangle("main_content_rect")?;
    content_rect
        .node_mut()
        .set_layout(Flow::Row)
        .set_fill_color(&[64.0, 64.0, 64.0])
        .set_font("Roboto")
        .set_font_size(17.0);

    content_rect.spacer()?;
    {
        let mut content = content_rect.rectangle("main_content")?;
        content.node_mut().set_layout(Flow::Column);
        content.fixed_spacer(30)?;

        for (index, project) in PROJECTS.iter().enumerate() {
            let id = format!("project{}", index);
            {
                let mut card = content.rectangle_with_class(&id, "project")?;
                card.node_mut().set_layout(Flow::Row);
                {
                    let mut image_rect = card.rectangle(&format!("{}_image_rect", id))?;
                    image_rect.node_mut().set_layout(Flow::Column);
                    image_rect.spacer()?;
                    {
                        let mut image =
                            image_rect.rectangle_with_class(&format!("{}_image", id), "project_image")?;
                        image.node_mut().set_image(project.image).set_width(IMAGE_SIZE);
                    }
                    image_rect.spacer()?;
                }
                card.fixed_spacer(30)?;
                {
                    let mut text_rect = card.rectangle(&format!("{}_text_rect", id))?;
                    text_rect.node_mut().set_layout(Flow::Column);
                    text_rect.spacer()?;
                    {
                        let mut text =
                            text_rect.rectangle_with_class(&format!("{}_text", id), "project_text")?;
                        text.node_mut()
                            .set_width(Expression::from(CONTENT_WIDTH) - IMAGE_SIZE - 30.0)
                            .set_text(format!(
                                "<h2><a href=\"{}\" target=\"_blank\">{}</a></h2><p>{}</p>",
                                project.href, project.title, project.summary
                            ))
                            .set_text_color(&FOREGROUND);
                    }
                    text_rect.spacer()?;
                }
            }
            debug!("Added project card '{}'", project.title);
            content.fixed_spacer(PROJECT_DISTANCE)?;
        }
    }
    content_rect.spacer()?;
    Ok(())
}

/// A footer as wide as the project column, which is only known once the
/// browser has laid the cards out.
fn footer(app: &mut Application) -> Result<()> {
    let column = app
        .tree()
        .find("main_content")
        .ok_or_else(|| anyhow::anyhow!("The project column has not been built"))?;
    let column_width = app.get_node(column)?.extent(Dimension::Width);

    let mut footer = app.rectangle("footer")?;
    footer
        .node_mut()
        .set_width(column_width)
        .set_height(40)
        .set_fill_color(&[39.0, 40.0, 34.0])
        .set_text_color(&FOREGROUND)
        .set_text("Built from rectangles")
        .set_style("margin", "0 auto")
        .set_style("text-align", "center");
    Ok(())
}
