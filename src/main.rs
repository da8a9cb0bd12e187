fn main() {
    bracket_hub::run();
}
