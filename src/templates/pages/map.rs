use super::browse::{browse_layout, BrowseVm};
use crate::domain::Listing;
use crate::geos::{MAP_BOUNDS, MAP_CENTER};
use crate::templates::components::safe_href;
use maud::{html, Markup, PreEscaped};
use serde_json::json;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

// Popups are assembled with textContent so listing text is never parsed as HTML.
const MAP_SCRIPT: &str = r#"
(function () {
  var data = JSON.parse(document.getElementById('map-data').textContent);
  var map = L.map('map').setView(data.center, 7);
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    maxZoom: 18,
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  map.fitBounds(data.bounds);
  data.places.forEach(function (p) {
    var el = document.createElement('div');
    var name = document.createElement('strong');
    name.textContent = p.name;
    el.appendChild(name);
    if (p.city) {
      var city = document.createElement('div');
      city.textContent = p.city;
      el.appendChild(city);
    }
    if (p.url) {
      var a = document.createElement('a');
      a.href = p.url;
      a.target = '_blank';
      a.rel = 'noopener noreferrer';
      a.textContent = 'Website';
      el.appendChild(a);
    }
    L.marker([p.lat, p.lng]).addTo(map).bindPopup(el);
  });
})();
"#;

/// JSON for the map script. `<` is escaped so the payload cannot close its script tag.
pub fn map_data(rows: &[&Listing]) -> String {
    let places: Vec<_> = rows
        .iter()
        .filter_map(|l| {
            let c = l.coordinates?;
            Some(json!({
                "name": l.organization,
                "city": l.city,
                "url": l.org_url.as_deref().and_then(safe_href),
                "lat": c.latitude,
                "lng": c.longitude,
            }))
        })
        .collect();

    json!({
        "center": [MAP_CENTER.0, MAP_CENTER.1],
        "bounds": [[MAP_BOUNDS[0].0, MAP_BOUNDS[0].1], [MAP_BOUNDS[1].0, MAP_BOUNDS[1].1]],
        "places": places,
    })
    .to_string()
    .replace('<', "\\u003c")
}

pub fn map_page(vm: &BrowseVm) -> Markup {
    let mapped = vm.rows.iter().filter(|l| l.coordinates.is_some()).count();

    browse_layout(
        "Map",
        "/map",
        vm,
        html! {
            link rel="stylesheet" href=(LEAFLET_CSS);
            script src=(LEAFLET_JS) {}
        },
        html! {
            @if mapped < vm.rows.len() {
                p class="muted" {
                    (vm.rows.len() - mapped) " of these have no known location and are not shown."
                }
            }
            div id="map" {}
            script id="map-data" type="application/json" { (PreEscaped(map_data(&vm.rows))) }
            script { (PreEscaped(MAP_SCRIPT)) }
        },
    )
}
