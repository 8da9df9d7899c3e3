fn main() {
    packgraph::cli::run();
}
